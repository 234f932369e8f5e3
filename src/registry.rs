use std::collections::HashMap;
use std::fmt::Formatter;
use std::fs;
use std::path::Path;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::util::validate::{validate_extension, validate_media_type};
use crate::{MalformedTableError, MediaTypeRecord};

/// An immutable table of media types and their metadata.
///
/// Lookups are by exact key. Keys are expected to be lowercase already; the
/// registry does no normalization of its own. Entries keep the order they had
/// in the literal the registry was loaded from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MediaTypeRegistry {
    records: Vec<(String, MediaTypeRecord)>,
    index: HashMap<String, usize>,
}

impl MediaTypeRegistry {
    /// Parses a table from its JSON literal form.
    pub fn from_json(literal: &str) -> Result<Self, MalformedTableError> {
        let OrderedEntries(entries) = serde_json::from_str(literal)?;
        Self::from_entries(entries)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MalformedTableError> {
        let path_ref = path.as_ref();
        log::trace!("Loading media type table from {}", path_ref.display());

        let literal = fs::read_to_string(path_ref)
            .map_err(|source| MalformedTableError::Io { path: path_ref.to_path_buf(), source })?;
        Self::from_json(&literal)
    }

    /// Builds a table from records in insertion order, validating every key
    /// and extension.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, MediaTypeRecord)>,
    ) -> Result<Self, MalformedTableError> {
        let entries = entries.into_iter();
        let mut records = Vec::with_capacity(entries.size_hint().0);
        let mut index = HashMap::with_capacity(entries.size_hint().0);

        for (media_type, record) in entries {
            validate_record(&media_type, &record)?;

            if index.contains_key(&media_type) {
                return Err(MalformedTableError::DuplicateKey(media_type));
            }
            index.insert(media_type.clone(), records.len());
            records.push((media_type, record));
        }

        log::debug!("Loaded {} media types", records.len());

        Ok(Self { records, index })
    }

    pub fn get(&self, media_type: &str) -> Option<&MediaTypeRecord> {
        self.index.get(media_type).map(|&i| &self.records[i].1)
    }

    pub fn contains(&self, media_type: &str) -> bool {
        self.index.contains_key(media_type)
    }

    /// Every media type and its record, in table order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, &MediaTypeRecord)> + DoubleEndedIterator + '_ {
        self.records.iter().map(|(media_type, record)| (media_type.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the table back into its compact literal form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn validate_record(media_type: &str, record: &MediaTypeRecord) -> Result<(), MalformedTableError> {
    validate_media_type(media_type).map_err(MalformedTableError::InvalidMediaType)?;

    let Some(extensions) = &record.extensions else {
        return Ok(());
    };

    if extensions.is_empty() {
        return Err(MalformedTableError::EmptyExtensions(media_type.to_owned()));
    }

    for extension in extensions {
        if validate_extension(extension).is_err() {
            return Err(MalformedTableError::InvalidExtension {
                media_type: media_type.to_owned(),
                extension: extension.clone(),
            });
        }
    }

    Ok(())
}

impl Serialize for MediaTypeRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (media_type, record) in &self.records {
            map.serialize_entry(media_type, record)?;
        }
        map.end()
    }
}

// keeps duplicate keys visible so they can be rejected instead of silently merged
struct OrderedEntries(Vec<(String, MediaTypeRecord)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
                f.write_str("an object mapping media types to records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, MediaTypeRecord>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
