use std::sync::LazyLock;
use crate::{MediaTypeRecord, MediaTypeRegistry};

/// The vendored media type database, compacted by the build script.
pub const EMBEDDED_TABLE: &str = include_str!(concat!(env!("OUT_DIR"), "/generated/db.json"));

/// License of the upstream database. Redistributions must carry it unchanged.
pub const LICENSE: &str = include_str!("../res/LICENSE");

// the build script has already rejected a malformed table, so failing here
// means the generated file was tampered with
static BUILTIN_REGISTRY: LazyLock<MediaTypeRegistry> = LazyLock::new(|| {
    MediaTypeRegistry::from_json(EMBEDDED_TABLE)
        .unwrap_or_else(|e| panic!("Embedded media type table is malformed: {e}"))
});

/// The process-wide registry, loaded from the embedded database on first use.
pub fn registry() -> &'static MediaTypeRegistry {
    &BUILTIN_REGISTRY
}

pub fn get(media_type: &str) -> Option<&'static MediaTypeRecord> {
    registry().get(media_type)
}

pub fn entries() -> impl ExactSizeIterator<Item = (&'static str, &'static MediaTypeRecord)> + DoubleEndedIterator {
    registry().entries()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;
    use crate::Source;

    const SOURCE_TABLE: &str = include_str!("../res/db.json");

    #[test]
    fn json_record_is_stable() {
        let expected = MediaTypeRecord {
            source: Some(Source::Iana),
            charset: Some("UTF-8".to_owned()),
            compressible: Some(true),
            extensions: Some(vec!["json".to_owned(), "map".to_owned()]),
        };
        for _ in 0..3 {
            assert_eq!(get("application/json"), Some(&expected));
        }
        assert!(std::ptr::eq(get("application/json").unwrap(), get("application/json").unwrap()));
    }

    #[test]
    fn misses_are_none() {
        assert_eq!(get("application/does-not-exist"), None);
        assert_eq!(get(""), None);
        assert_eq!(get("Application/JSON"), None);
    }

    #[test]
    fn entries_cover_every_key_once() {
        let source: serde_json::Map<String, serde_json::Value> = serde_json::from_str(SOURCE_TABLE).unwrap();
        assert_eq!(entries().len(), source.len());

        let seen: HashSet<&str> = entries().map(|(k, _)| k).collect();
        assert_eq!(seen.len(), source.len());
        for key in source.keys() {
            assert!(seen.contains(key.as_str()), "missing {key}");
        }

        let order: Vec<&str> = entries().map(|(k, _)| k).collect();
        let source_order: Vec<&str> = source.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, source_order);
    }

    #[test]
    fn keys_are_two_part_lowercase() {
        for (media_type, _) in entries() {
            let (top_level, subtype) = media_type.split_once('/').unwrap();
            assert!(!top_level.is_empty() && !subtype.is_empty(), "{media_type}");
            assert!(!subtype.contains('/'), "{media_type}");
            assert_eq!(media_type, media_type.to_ascii_lowercase());
        }
    }

    #[test]
    fn extensions_are_lowercase_alphanumeric() {
        // upstream spellings that carry an inner hyphen or underscore
        const PUNCTUATED: &[&str] = &["fe_launch", "n-gage", "sfd-hdstx", "vbox-extpack"];

        let mut punctuated = Vec::new();
        for (media_type, record) in entries() {
            let Some(extensions) = &record.extensions else { continue };
            assert!(!extensions.is_empty(), "{media_type}");
            for ext in extensions {
                assert!(!ext.is_empty(), "{media_type}");
                if !ext.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
                    punctuated.push(ext.as_str());
                }
            }
        }
        punctuated.sort_unstable();
        assert_eq!(punctuated, PUNCTUATED);
    }

    #[test]
    fn full_upstream_table_is_vendored() {
        assert_eq!(registry().len(), 2304);

        let long_tail = [
            ("application/x-cpio", Source::Apache, "cpio"),
            ("chemical/x-cdx", Source::Apache, "cdx"),
            ("application/vnd.lotus-1-2-3", Source::Iana, "123"),
            ("application/x-msaccess", Source::Apache, "mdb"),
            ("application/vnd.amazon.ebook", Source::Apache, "azw"),
            ("application/x-cbr", Source::Apache, "cbr"),
        ];
        for (media_type, source, extension) in long_tail {
            let record = get(media_type).unwrap_or_else(|| panic!("missing {media_type}"));
            assert_eq!(record.source, Some(source), "{media_type}");
            assert_eq!(record.preferred_extension(), Some(extension), "{media_type}");
        }

        assert_eq!(get("application/x-cbr").and_then(|r| r.extensions.as_ref()).map(Vec::len), Some(5));
        assert!(get("audio/amr-wb+").is_some());
        assert_eq!(get("application/vnd.nokia.n-gage.symbian.install").unwrap().preferred_extension(), Some("n-gage"));
    }

    #[test]
    fn dump_round_trips() {
        let dumped = registry().to_json().unwrap();
        assert_eq!(&MediaTypeRegistry::from_json(&dumped).unwrap(), registry());
        assert_eq!(dumped, EMBEDDED_TABLE);
    }

    #[test]
    fn upstream_overlaps_are_preserved() {
        assert_eq!(get("audio/wav").and_then(|r| r.preferred_extension()), Some("wav"));
        assert_eq!(get("audio/wave").and_then(|r| r.preferred_extension()), Some("wav"));

        let keynote_owners: Vec<&str> = entries()
            .filter(|(_, r)| r.has_extension("key"))
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keynote_owners, ["application/vnd.apple.keynote", "application/x-iwork-keynote-sffkey"]);
    }

    #[test]
    fn compressible_absent_is_not_false() {
        let svg = get("image/svg+xml").unwrap();
        assert_eq!(svg.compressible, Some(true));
        let png = get("image/png").unwrap();
        assert_eq!(png.compressible, Some(false));
        let sfnt = get("font/sfnt").unwrap();
        assert_eq!(sfnt.compressible, None);
        assert_eq!(get("application/json5").unwrap().source, None);
    }

    #[test]
    fn license_is_carried() {
        assert!(LICENSE.starts_with("(The MIT License)"));
        assert!(LICENSE.contains("Douglas Christopher Wilson"));
    }
}
