/* Inspect command - show what would be embedded, without generating */

use crate::schema::SchemaLoader;
use crate::wire;
use clap::ValueEnum;
use serde_derive::Serialize;
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct FileReport {
    name: String,
    package: String,
    dependencies: Vec<String>,
    records: usize,
    serialized_bytes: usize,
}

/* Execute the inspect command */
pub fn run(
    files: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut loader = SchemaLoader::new(include_dirs);
    for file in &files {
        loader.load_file_with_imports(file, false)?;
    }
    let set = loader.into_set();
    set.verify_dependencies()?;

    let mut reports = Vec::with_capacity(set.len());
    for file in set.files() {
        let payload = wire::schema_file_to_wire(file)?;
        reports.push(FileReport {
            name: file.name.clone(),
            package: file.package.clone(),
            dependencies: file.dependencies.clone(),
            records: file.records.len(),
            serialized_bytes: payload.len(),
        });
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.name);
                if !report.package.is_empty() {
                    println!("  package: {}", report.package);
                }
                println!("  records: {}", report.records);
                println!("  serialized: {} byte(s)", report.serialized_bytes);
                if !report.dependencies.is_empty() {
                    println!("  dependencies:");
                    for dependency in &report.dependencies {
                        println!("    - {}", dependency);
                    }
                }
            }
        }
    }

    Ok(())
}
