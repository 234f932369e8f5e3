use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::defines::{SOURCE_APACHE, SOURCE_IANA, SOURCE_NGINX};
use crate::UnknownSourceError;

/// Where a media type registration comes from.
///
/// A record without a source describes a community-defined type that none of
/// the upstream registries list.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Iana,
    Apache,
    Nginx,
}

impl Source {
    pub fn from_name(name: &str) -> Option<Source> {
        match name {
            SOURCE_IANA => Some(Source::Iana),
            SOURCE_APACHE => Some(Source::Apache),
            SOURCE_NGINX => Some(Source::Nginx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Iana => SOURCE_IANA,
            Source::Apache => SOURCE_APACHE,
            Source::Nginx => SOURCE_NGINX,
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = UnknownSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::from_name(s).ok_or_else(|| UnknownSourceError(s.to_owned()))
    }
}
