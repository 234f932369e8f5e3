// registration sources, as spelled in the database literal
pub(crate) const SOURCE_IANA: &str = "iana";
pub(crate) const SOURCE_APACHE: &str = "apache";
pub(crate) const SOURCE_NGINX: &str = "nginx";
