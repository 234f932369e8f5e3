use serde::{Deserialize, Serialize};
use crate::Source;

/// Metadata describing a single media type.
///
/// Every field is optional and an absent field carries its own meaning: a
/// missing `compressible` is "unknown", which is not the same as `false`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaTypeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressible: Option<bool>,
    /// Extensions without the leading dot, most preferred first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

impl MediaTypeRecord {
    pub fn preferred_extension(&self) -> Option<&str> {
        self.extensions.as_ref()
            .and_then(|exts| exts.first())
            .map(|ext| ext.as_str())
    }

    pub fn has_extension(&self, extension: &str) -> bool {
        self.extensions.as_ref()
            .is_some_and(|exts| exts.iter().any(|ext| ext == extension))
    }

    pub fn is_registered(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_stay_absent() {
        let record: MediaTypeRecord = serde_json::from_str(r#"{"compressible":false}"#).unwrap();
        assert_eq!(record.source, None);
        assert_eq!(record.charset, None);
        assert_eq!(record.compressible, Some(false));
        assert_eq!(record.extensions, None);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"compressible":false}"#);

        let empty: MediaTypeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.compressible, None);
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn field_order_matches_literal() {
        let record = MediaTypeRecord {
            source: Some(Source::Iana),
            charset: Some("UTF-8".to_owned()),
            compressible: Some(true),
            extensions: Some(vec!["css".to_owned()]),
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"source":"iana","charset":"UTF-8","compressible":true,"extensions":["css"]}"#,
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<MediaTypeRecord>(r#"{"notes":"x"}"#).is_err());
        assert!(serde_json::from_str::<MediaTypeRecord>(r#"{"source":"debian"}"#).is_err());
        assert!(serde_json::from_str::<MediaTypeRecord>(r#"{"compressible":"yes"}"#).is_err());
    }

    #[test]
    fn extension_helpers() {
        let record = MediaTypeRecord {
            extensions: Some(vec!["jpeg".to_owned(), "jpg".to_owned(), "jpe".to_owned()]),
            ..Default::default()
        };
        assert_eq!(record.preferred_extension(), Some("jpeg"));
        assert!(record.has_extension("jpg"));
        assert!(!record.has_extension("png"));
        assert!(!record.is_registered());
        assert_eq!(MediaTypeRecord::default().preferred_extension(), None);
    }
}
