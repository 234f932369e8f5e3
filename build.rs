use std::collections::HashSet;
use std::{env, fs};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[path = "src/util/validate.rs"]
#[allow(dead_code)]
mod validate;

// input paths
const RESOURCES_DIR_REL_PATH: &str = "res";
const DB_FILE_NAME: &str = "db.json";
const LICENSE_FILE_NAME: &str = "LICENSE";

// output paths
const GENERATED_OUT_PREFIX: &str = "generated/";
const OUT_FILE_NAME: &str = "db.json";

const RECORD_FIELDS: &[&str] = &["source", "charset", "compressible", "extensions"];
const RECORD_SOURCES: &[&str] = &["iana", "apache", "nginx"];

fn main() {
    let crate_root = env::current_dir().expect("Failed to get current directory");
    let db_path = crate_root
        .join(RESOURCES_DIR_REL_PATH)
        .join(DB_FILE_NAME);
    let license_path = crate_root
        .join(RESOURCES_DIR_REL_PATH)
        .join(LICENSE_FILE_NAME);

    if !db_path.exists() {
        panic!("Media type database ({}) is missing", DB_FILE_NAME);
    }

    if !license_path.exists() {
        panic!("Media type database license ({}) is missing", LICENSE_FILE_NAME);
    }

    println!("cargo::rerun-if-changed={}", db_path.display());
    println!("cargo::rerun-if-changed={}", license_path.display());

    let table = parse_db(&db_path);
    if let Err(e) = check_table(&table) {
        panic!("Media type database is malformed: {e}");
    }

    write_table_to_disk(table);
}

fn parse_db(path: impl AsRef<Path>) -> Map<String, Value> {
    let contents = File::open(path.as_ref())
        .and_then(|mut f| {
            let mut s = String::new();
            f.read_to_string(&mut s)?;
            Ok(s)
        })
        .expect("Failed to open media type database");

    let table = match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => map,
        Ok(_) => panic!("Media type database root must be an object"),
        Err(e) => panic!("Media type database is not valid JSON: {e}"),
    };

    // the object form above silently keeps only the last of any repeated key
    let KeyList(keys) = serde_json::from_str(&contents).expect("Failed to list database keys");
    if keys.len() != table.len() {
        let mut seen = HashSet::with_capacity(keys.len());
        let dupes: Vec<&str> = keys.iter()
            .filter(|k| !seen.insert(k.as_str()))
            .map(|k| k.as_str())
            .collect();
        panic!("Media type database has duplicate keys: {}", dupes.join(", "));
    }

    table
}

struct KeyList(Vec<String>);

impl<'de> Deserialize<'de> for KeyList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = KeyList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut keys = Vec::new();
                while let Some((key, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                    keys.push(key);
                }
                Ok(KeyList(keys))
            }
        }

        deserializer.deserialize_map(KeyVisitor)
    }
}

fn check_table(table: &Map<String, Value>) -> Result<(), String> {
    for (media_type, record) in table {
        validate::validate_media_type(media_type)?;

        let Value::Object(fields) = record else {
            return Err(format!("Record for '{media_type}' is not an object"));
        };

        for (name, value) in fields {
            if !RECORD_FIELDS.contains(&name.as_str()) {
                return Err(format!("Record for '{media_type}' has unknown field '{name}'"));
            }

            match (name.as_str(), value) {
                ("source", Value::String(s)) if RECORD_SOURCES.contains(&s.as_str()) => {}
                ("charset", Value::String(_)) => {}
                ("compressible", Value::Bool(_)) => {}
                ("extensions", Value::Array(exts)) => {
                    if exts.is_empty() {
                        return Err(format!("Record for '{media_type}' has an empty extension list"));
                    }
                    for ext in exts {
                        let Value::String(ext) = ext else {
                            return Err(format!("Record for '{media_type}' has a non-string extension"));
                        };
                        validate::validate_extension(ext)?;
                    }
                }
                _ => {
                    return Err(format!("Record for '{media_type}' has an invalid '{name}' value"));
                }
            }
        }
    }

    Ok(())
}

fn write_table_to_disk(table: Map<String, Value>) {
    let out_dir_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    let gen_dir_path = out_dir_path.join(GENERATED_OUT_PREFIX);
    let out_file_path = gen_dir_path.join(OUT_FILE_NAME);

    _ = fs::create_dir_all(gen_dir_path);

    let mut out_file = File::create(out_file_path).expect("Failed to create generated database file");

    let compact = serde_json::to_string(&Value::Object(table)).expect("Failed to serialize database");
    out_file.write_all(compact.as_bytes()).expect("Failed to write database");
}
