pub mod chunks;
pub mod embed;
pub mod names;
pub mod printer;

use crate::schema::{SchemaSet, SchemaSetError};
use crate::wire::WireError;
use embed::{EmbedGenerator, GeneratedArtifacts};
use names::NameError;
use std::path::Path;
use thiserror::Error;

/* How generated namespaces are derived from schema packages */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum NamespaceStyle {
    /* Use the schema file's package string as-is */
    #[default]
    SchemaPackage,
    /* Prepend a "gen" segment to keep generated code out of hand-written
     * namespaces */
    Prefixed,
}

pub struct GeneratorOptions {
    /* Replace the embedded payload with an empty placeholder */
    pub strip_nonfunctional_content: bool,
    /* Omit dependency references from the reconstruction call */
    pub restricted_runtime_mode: bool,
    /* Emit the position-annotation sidecar next to each generated file */
    pub annotate_output: bool,
    pub namespace_style: NamespaceStyle,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            strip_nonfunctional_content: false,
            restricted_runtime_mode: false,
            annotate_output: false,
            namespace_style: NamespaceStyle::SchemaPackage,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to serialize schema '{file}': {source}")]
    Serialize {
        file: String,
        #[source]
        source: WireError,
    },
    #[error("failed to write generated output: {0}")]
    Sink(#[from] std::io::Error),
    #[error(transparent)]
    Resolver(#[from] NameError),
    #[error(transparent)]
    Set(#[from] SchemaSetError),
}

/* Emit one generated source file (and optional annotation sidecar) per
 * schema file in the set, in set order. The first failure aborts; files
 * already written stay on disk and the caller decides whether to keep
 * them. */
pub fn generate_all(
    set: &SchemaSet,
    options: &GeneratorOptions,
    out_dir: &Path,
    verbose: bool,
) -> Result<Vec<GeneratedArtifacts>, GenerateError> {
    let mut generator = EmbedGenerator::new(set, options);
    let mut artifacts = Vec::with_capacity(set.len());
    for file in set.files() {
        let generated = generator.generate(file, out_dir)?;
        if verbose {
            println!(
                "[~] Embedded descriptor for '{}' in {}",
                file.name,
                generated.source_path.display()
            );
        }
        artifacts.push(generated);
    }
    Ok(artifacts)
}
