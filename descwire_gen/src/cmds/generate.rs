/* Generate command - emit descriptor holder sources for schema files */

use crate::codegen::{self, GeneratorOptions, NamespaceStyle};
use crate::schema::SchemaLoader;
use std::path::PathBuf;

/* Execute the generate command */
pub fn run(
    files: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    output_dir: PathBuf,
    options: GeneratorOptions,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        println!("descwire - Descriptor Embedding Tool");
        println!("====================================\n");
        println!("[~] Configuration:");
        println!("  Output directory: {}", output_dir.display());
        println!("  Input files: {}", files.len());
        for file in &files {
            println!("    - {}", file.display());
        }
        if !include_dirs.is_empty() {
            println!("  Include directories: {}", include_dirs.len());
            for dir in &include_dirs {
                println!("    - {}", dir.display());
            }
        }
        println!(
            "  strip-nonfunctional: {}, restricted-runtime: {}, annotate: {}, namespace-style: {:?}",
            options.strip_nonfunctional_content,
            options.restricted_runtime_mode,
            options.annotate_output,
            options.namespace_style,
        );
        println!();
    }

    let mut loader = SchemaLoader::new(include_dirs);
    for file in &files {
        loader.load_file_with_imports(file, verbose)?;
    }
    let set = loader.into_set();
    set.verify_dependencies()?;

    if verbose {
        println!(
            "\n[~] Loaded {} schema file(s) total (including imports)",
            set.len()
        );
    }

    std::fs::create_dir_all(&output_dir)?;
    let artifacts = codegen::generate_all(&set, &options, &output_dir, verbose)?;

    println!("[✓] Generated {} file(s):", artifacts.len());
    for artifact in &artifacts {
        println!("    - {}", artifact.source_path.display());
        if let Some(meta) = &artifact.annotation_path {
            println!("    - {}", meta.display());
        }
    }

    Ok(())
}

/* Translate CLI flags into generator options */
pub fn options_from_flags(
    strip_nonfunctional: bool,
    restricted_runtime: bool,
    annotate: bool,
    namespace_style: NamespaceStyle,
) -> GeneratorOptions {
    GeneratorOptions {
        strip_nonfunctional_content: strip_nonfunctional,
        restricted_runtime_mode: restricted_runtime,
        annotate_output: annotate,
        namespace_style,
    }
}
