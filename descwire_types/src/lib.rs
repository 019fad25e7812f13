//! Schema Model Definitions
//!
//! This crate contains the in-memory representation of one compiled schema
//! file as consumed by the descwire code generation backend. It provides
//! pure data structures without any file I/O or code generation logic.

pub mod schema;

// Re-export commonly used types at the crate root
pub use schema::*;
