//! Descriptor embedding backend for the descwire schema compiler.
//!
//! Takes parsed schema-file descriptions and emits, per schema file, a
//! generated Java source file whose static initializer rebuilds the schema
//! descriptor at program startup from an embedded, chunked, escaped
//! string-literal copy of the schema's serialized wire form.

pub mod cmds;
pub mod codegen;
pub mod schema;
pub mod wire;
