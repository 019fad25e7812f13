pub mod loader;
pub mod set;

pub use loader::{LoadError, SchemaLoader};
pub use set::{SchemaSet, SchemaSetError};
