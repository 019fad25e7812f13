use descwire_types::SchemaFile;
use indexmap::IndexMap;
use thiserror::Error;

/* Request-scoped collection of schema files keyed by declared file name.
 * Insertion order is preserved so generation output is deterministic for a
 * given load order. Dependencies are looked up here by name; the set never
 * rewrites or reorders a file's dependency list. */
#[derive(Debug, Default)]
pub struct SchemaSet {
    files: IndexMap<String, SchemaFile>,
}

impl SchemaSet {
    pub fn new() -> Self {
        Self::default()
    }

    /* Add a schema file; duplicate names are rejected */
    pub fn insert(&mut self, file: SchemaFile) -> Result<(), SchemaSetError> {
        if self.files.contains_key(&file.name) {
            return Err(SchemaSetError::Duplicate { name: file.name });
        }
        self.files.insert(file.name.clone(), file);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaFile> {
        self.files.get(name)
    }

    /* Look up a dependency, failing with the referencing file's name */
    pub fn require(&self, name: &str, referenced_by: &str) -> Result<&SchemaFile, SchemaSetError> {
        self.files
            .get(name)
            .ok_or_else(|| SchemaSetError::MissingDependency {
                dependency: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    pub fn files(&self) -> impl Iterator<Item = &SchemaFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /* Check that every declared dependency is present in the set */
    pub fn verify_dependencies(&self) -> Result<(), SchemaSetError> {
        for file in self.files.values() {
            for dependency in &file.dependencies {
                self.require(dependency, &file.name)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SchemaSetError {
    #[error("schema file '{name}' is declared more than once")]
    Duplicate { name: String },
    #[error("schema file '{referenced_by}' depends on '{dependency}', which is not loaded")]
    MissingDependency {
        dependency: String,
        referenced_by: String,
    },
}
