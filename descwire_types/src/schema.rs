use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/* Scalar or record-reference type of a declared field.
 *
 * In YAML a scalar type is a bare keyword (`field-type: uint64`) and a
 * record reference is a single-key mapping (`field-type:\n  record: "X"`),
 * so serialization is hand-written rather than derived. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float,
    Double,
    String,
    Bytes,
    /* Reference to a record declared in this file or in a dependency */
    Record(String),
}

const SCALAR_KEYWORDS: &[&str] = &[
    "bool", "int32", "int64", "uint32", "uint64", "float", "double", "string", "bytes",
];

impl FieldType {
    fn keyword(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Uint32 => "uint32",
            FieldType::Uint64 => "uint64",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::String => "string",
            FieldType::Bytes => "bytes",
            FieldType::Record(_) => "record",
        }
    }
}

impl serde::Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FieldType::Record(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("record", name)?;
                map.end()
            }
            scalar => serializer.serialize_str(scalar.keyword()),
        }
    }
}

impl<'de> serde::Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(FieldTypeVisitor)
    }
}

struct FieldTypeVisitor;

impl<'de> Visitor<'de> for FieldTypeVisitor {
    type Value = FieldType;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar type keyword or a single-key `record` mapping")
    }

    fn visit_str<E>(self, value: &str) -> Result<FieldType, E>
    where
        E: de::Error,
    {
        match value {
            "bool" => Ok(FieldType::Bool),
            "int32" => Ok(FieldType::Int32),
            "int64" => Ok(FieldType::Int64),
            "uint32" => Ok(FieldType::Uint32),
            "uint64" => Ok(FieldType::Uint64),
            "float" => Ok(FieldType::Float),
            "double" => Ok(FieldType::Double),
            "string" => Ok(FieldType::String),
            "bytes" => Ok(FieldType::Bytes),
            other => Err(de::Error::unknown_variant(other, SCALAR_KEYWORDS)),
        }
    }

    fn visit_map<A>(self, mut map: A) -> Result<FieldType, A::Error>
    where
        A: MapAccess<'de>,
    {
        let key: String = map
            .next_key()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if key != "record" {
            return Err(de::Error::unknown_field(&key, &["record"]));
        }
        let name = map.next_value()?;
        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom("expected a single `record` key"));
        }
        Ok(FieldType::Record(name))
    }
}

/* One field of a record declaration */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FieldDecl {
    pub name: String,
    pub number: u32,
    pub field_type: FieldType,
    #[serde(default)]
    pub repeated: bool,
}

/* One record (message-like) declaration inside a schema file */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RecordDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub comment: Option<String>,
}

/* The compiled representation of one schema file.
 *
 * `name` is the originating file path; it is used as a human-readable
 * comment in generated output and as the lookup key for dependencies.
 * `dependencies` holds the names of imported schema files in declaration
 * order. That order is load-bearing: the generated reconstruction call
 * passes dependency descriptors positionally. */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaFile {
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub records: Vec<RecordDecl>,
}

impl SchemaFile {
    /* File name without directory components or extension,
     * e.g. "proto/user_events.schema" -> "user_events" */
    pub fn basename(&self) -> &str {
        let tail = self
            .name
            .rsplit_once('/')
            .map(|(_, tail)| tail)
            .unwrap_or(&self.name);
        tail.split_once('.').map(|(stem, _)| stem).unwrap_or(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_directories_and_extension() {
        let file = SchemaFile {
            name: "proto/nested/user_events.schema".into(),
            package: String::new(),
            dependencies: vec![],
            records: vec![],
        };
        assert_eq!(file.basename(), "user_events");

        let bare = SchemaFile {
            name: "common".into(),
            package: String::new(),
            dependencies: vec![],
            records: vec![],
        };
        assert_eq!(bare.basename(), "common");
    }

    #[test]
    fn schema_file_parses_from_yaml() {
        let yaml = r#"
name: "proto/user_events.schema"
package: "acme.events"
dependencies:
  - "proto/common.schema"
records:
  - name: "UserEvent"
    fields:
      - name: "id"
        number: 1
        field-type: uint64
      - name: "labels"
        number: 2
        field-type: string
        repeated: true
      - name: "origin"
        number: 3
        field-type:
          record: "Origin"
"#;
        let file: SchemaFile = serde_yml::from_str(yaml).expect("parse schema yaml");
        assert_eq!(file.name, "proto/user_events.schema");
        assert_eq!(file.package, "acme.events");
        assert_eq!(file.dependencies, vec!["proto/common.schema"]);
        assert_eq!(file.records.len(), 1);
        let record = &file.records[0];
        assert_eq!(record.fields[0].field_type, FieldType::Uint64);
        assert!(record.fields[1].repeated);
        assert_eq!(
            record.fields[2].field_type,
            FieldType::Record("Origin".into())
        );
    }

    #[test]
    fn field_type_accepts_keywords_and_record_maps() {
        let scalar: FieldType = serde_yml::from_str("uint64").expect("scalar keyword");
        assert_eq!(scalar, FieldType::Uint64);

        let reference: FieldType =
            serde_yml::from_str("record: \"Origin\"").expect("record mapping");
        assert_eq!(reference, FieldType::Record("Origin".into()));

        serde_yml::from_str::<FieldType>("uint128").expect_err("unknown keyword");
        serde_yml::from_str::<FieldType>("rekord: \"Origin\"").expect_err("unknown key");
    }

    #[test]
    fn field_type_serialization_round_trips() {
        for original in [
            FieldType::Bool,
            FieldType::Int32,
            FieldType::Bytes,
            FieldType::Record("Timestamp".into()),
        ] {
            let yaml = serde_yml::to_string(&original).expect("serialize");
            let back: FieldType = serde_yml::from_str(&yaml).expect("reparse");
            assert_eq!(back, original, "yaml was {yaml:?}");
        }
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let file: SchemaFile = serde_yml::from_str("name: \"a.schema\"").expect("parse");
        assert!(file.package.is_empty());
        assert!(file.dependencies.is_empty());
        assert!(file.records.is_empty());
    }
}
