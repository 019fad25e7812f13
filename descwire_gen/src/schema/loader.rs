use super::set::{SchemaSet, SchemaSetError};
use descwire_types::SchemaFile;
use std::path::{Path, PathBuf};
use thiserror::Error;

/* Loads schema description files (YAML) from disk, pulling in declared
 * dependencies through the include directories. A dependency name is the
 * declared `name` of the imported schema file, interpreted as a path
 * relative to each include directory in turn. */
pub struct SchemaLoader {
    include_dirs: Vec<PathBuf>,
    set: SchemaSet,
    /* Names currently being loaded, used for import cycle detection */
    in_progress: Vec<String>,
}

impl SchemaLoader {
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            include_dirs,
            set: SchemaSet::new(),
            in_progress: Vec::new(),
        }
    }

    /* Load one schema file and, recursively, every dependency it declares */
    pub fn load_file_with_imports(
        &mut self,
        path: &Path,
        verbose: bool,
    ) -> Result<(), LoadError> {
        let file = self.parse_file(path)?;
        self.load_parsed(file, path, verbose)
    }

    pub fn into_set(self) -> SchemaSet {
        self.set
    }

    fn load_parsed(
        &mut self,
        file: SchemaFile,
        path: &Path,
        verbose: bool,
    ) -> Result<(), LoadError> {
        if self.set.get(&file.name).is_some() {
            return Ok(());
        }
        if self.in_progress.contains(&file.name) {
            let mut chain = self.in_progress.clone();
            chain.push(file.name.clone());
            return Err(LoadError::ImportCycle { chain });
        }

        if verbose {
            println!("[~] Loaded schema '{}' from {}", file.name, path.display());
        }

        self.in_progress.push(file.name.clone());
        for dependency in file.dependencies.clone() {
            if self.set.get(&dependency).is_some() {
                continue;
            }
            let dep_path = self.locate(&dependency, path).ok_or_else(|| {
                LoadError::DependencyNotFound {
                    dependency: dependency.clone(),
                    referenced_by: file.name.clone(),
                }
            })?;
            let dep_file = self.parse_file(&dep_path)?;
            self.load_parsed(dep_file, &dep_path, verbose)?;
        }
        self.in_progress.pop();

        self.set.insert(file)?;
        Ok(())
    }

    fn parse_file(&self, path: &Path) -> Result<SchemaFile, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yml::from_str(&contents).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /* Resolve a dependency name against the importing file's directory
     * first, then each include directory in order */
    fn locate(&self, dependency: &str, referenced_from: &Path) -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(parent) = referenced_from.parent() {
            candidates.push(parent.join(dependency));
        }
        for dir in &self.include_dirs {
            candidates.push(dir.join(dependency));
        }
        candidates.into_iter().find(|candidate| candidate.is_file())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
    #[error("schema '{referenced_by}' imports '{dependency}', which was not found in any include directory")]
    DependencyNotFound {
        dependency: String,
        referenced_by: String,
    },
    #[error("import cycle detected: {chain:?}")]
    ImportCycle { chain: Vec<String> },
    #[error(transparent)]
    Set(#[from] SchemaSetError),
}
