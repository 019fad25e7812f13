//! Wire form of a schema file.
//!
//! The generated holder class embeds the schema as serialized bytes, so the
//! schema model has a stable protobuf representation that the descwire
//! runtime parses back at initialization time. The messages here are the
//! fixed contract between this generator and that runtime.

use descwire_types::{FieldDecl, FieldType, RecordDecl, SchemaFile};
use prost::Message;
use thiserror::Error;

#[derive(Clone, PartialEq, Message)]
pub struct SchemaFileProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub package: String,
    /* Dependency file names, declaration order. The runtime matches the
     * descriptors passed to buildFrom() against this list by position. */
    #[prost(string, repeated, tag = "3")]
    pub dependency: Vec<String>,
    #[prost(message, repeated, tag = "4")]
    pub records: Vec<RecordProto>,
}

#[derive(Clone, PartialEq, Message)]
pub struct RecordProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub fields: Vec<FieldProto>,
}

#[derive(Clone, PartialEq, Message)]
pub struct FieldProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(uint32, tag = "2")]
    pub number: u32,
    #[prost(enumeration = "FieldKind", tag = "3")]
    pub kind: i32,
    /* Referenced record name, only set when kind == Record */
    #[prost(string, optional, tag = "4")]
    pub type_name: Option<String>,
    #[prost(bool, tag = "5")]
    pub repeated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FieldKind {
    Bool = 0,
    Int32 = 1,
    Int64 = 2,
    Uint32 = 3,
    Uint64 = 4,
    Float = 5,
    Double = 6,
    String = 7,
    Bytes = 8,
    Record = 9,
}

/* Sidecar annotation artifact: maps identifier spans in the generated text
 * back to the originating schema file. */
#[derive(Clone, PartialEq, Message)]
pub struct GeneratedInfo {
    #[prost(message, repeated, tag = "1")]
    pub annotations: Vec<Annotation>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Annotation {
    #[prost(string, tag = "1")]
    pub source_file: String,
    /* Byte span in the generated source, [begin, end) */
    #[prost(uint64, tag = "2")]
    pub begin: u64,
    #[prost(uint64, tag = "3")]
    pub end: u64,
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("failed to encode protobuf: {0}")]
    ProtobufEncode(#[from] prost::EncodeError),
}

/// Serialize one schema file into its wire byte form.
pub fn schema_file_to_wire(file: &SchemaFile) -> Result<Vec<u8>, WireError> {
    let proto = SchemaFileProto::from(file);
    encode_message(&proto)
}

/// Serialize the empty placeholder payload used when non-functional content
/// is stripped. The payload still exists, it is just zero bytes long.
pub fn empty_schema_wire() -> Result<Vec<u8>, WireError> {
    encode_message(&SchemaFileProto::default())
}

/// Serialize the annotation sidecar record.
pub fn generated_info_to_wire(info: &GeneratedInfo) -> Result<Vec<u8>, WireError> {
    encode_message(info)
}

fn encode_message<M: Message>(message: &M) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::with_capacity(message.encoded_len());
    message.encode(&mut buf).map_err(WireError::from)?;
    Ok(buf)
}

impl From<&SchemaFile> for SchemaFileProto {
    fn from(value: &SchemaFile) -> Self {
        Self {
            name: value.name.clone(),
            package: value.package.clone(),
            dependency: value.dependencies.clone(),
            records: value.records.iter().map(RecordProto::from).collect(),
        }
    }
}

impl From<&RecordDecl> for RecordProto {
    fn from(value: &RecordDecl) -> Self {
        Self {
            name: value.name.clone(),
            fields: value.fields.iter().map(FieldProto::from).collect(),
        }
    }
}

impl From<&FieldDecl> for FieldProto {
    fn from(value: &FieldDecl) -> Self {
        let (kind, type_name) = match &value.field_type {
            FieldType::Bool => (FieldKind::Bool, None),
            FieldType::Int32 => (FieldKind::Int32, None),
            FieldType::Int64 => (FieldKind::Int64, None),
            FieldType::Uint32 => (FieldKind::Uint32, None),
            FieldType::Uint64 => (FieldKind::Uint64, None),
            FieldType::Float => (FieldKind::Float, None),
            FieldType::Double => (FieldKind::Double, None),
            FieldType::String => (FieldKind::String, None),
            FieldType::Bytes => (FieldKind::Bytes, None),
            FieldType::Record(name) => (FieldKind::Record, Some(name.clone())),
        };
        Self {
            name: value.name.clone(),
            number: value.number,
            kind: kind as i32,
            type_name,
            repeated: value.repeated,
        }
    }
}
