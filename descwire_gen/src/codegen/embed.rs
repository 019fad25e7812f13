//! Emits the descriptor-embedding block for one schema file.
//!
//! The generated holder class carries the serialized schema as chunked
//! string literals and a static initializer that reassembles them and calls
//! the runtime's buildFrom() with the dependency descriptors in declaration
//! order. The whole file is assembled in memory and written with a single
//! fs::write, so a failed generation never leaves a partial source file.

use crate::codegen::chunks::{self, ChunkGroup};
use crate::codegen::names::NameResolver;
use crate::codegen::printer::Printer;
use crate::codegen::{GenerateError, GeneratorOptions};
use crate::schema::SchemaSet;
use crate::wire::{self, GeneratedInfo};
use descwire_types::SchemaFile;
use std::fs;
use std::path::{Path, PathBuf};

/* Limit the number of raw bytes per chunk line. */
const BYTES_PER_LINE: usize = 40;
/* Limit the number of chunk lines per string-array element. Each element
 * then holds at most 16,000 raw bytes, comfortably under the 64k literal
 * ceiling of the target platform. */
const LINES_PER_GROUP: usize = 400;

/* Qualified name of the runtime type that rebuilds descriptors */
const RUNTIME_DESCRIPTOR: &str = "io.descwire.runtime.SchemaDescriptor";

/* Resolved dependency, declaration order preserved by the caller */
struct DependencyRef {
    qualified_holder: String,
}

#[derive(Debug)]
pub struct GeneratedArtifacts {
    pub source_path: PathBuf,
    pub annotation_path: Option<PathBuf>,
}

pub struct EmbedGenerator<'a> {
    set: &'a SchemaSet,
    options: &'a GeneratorOptions,
    resolver: NameResolver,
}

impl<'a> EmbedGenerator<'a> {
    pub fn new(set: &'a SchemaSet, options: &'a GeneratorOptions) -> Self {
        Self {
            set,
            options,
            resolver: NameResolver::new(options.namespace_style),
        }
    }

    /* Generate the holder source file for `file` under `out_dir`, plus the
     * annotation sidecar when requested */
    pub fn generate(
        &mut self,
        file: &SchemaFile,
        out_dir: &Path,
    ) -> Result<GeneratedArtifacts, GenerateError> {
        let class_name = self.resolver.holder_class_name(file);
        let namespace = self.resolver.namespace(file)?;

        /* Resolve every name before emitting anything: a resolver failure
         * must not produce output */
        let dependencies = self.resolve_dependencies(file)?;

        let payload = if self.options.strip_nonfunctional_content {
            wire::empty_schema_wire()
        } else {
            wire::schema_file_to_wire(file)
        }
        .map_err(|source| GenerateError::Serialize {
            file: file.name.clone(),
            source,
        })?;
        let groups = chunks::encode(&payload, BYTES_PER_LINE, LINES_PER_GROUP);

        let mut printer = Printer::new(self.options.annotate_output);
        self.emit_header(&mut printer, file, &namespace);
        self.emit_holder_class(&mut printer, file, &class_name, &groups, &dependencies);

        let package_dir = out_dir.join(namespace.replace('.', "/"));
        fs::create_dir_all(&package_dir)?;
        let source_path = package_dir.join(format!("{class_name}.java"));

        let (text, annotations) = printer.into_parts();
        fs::write(&source_path, text)?;

        let annotation_path = if self.options.annotate_output {
            let info = GeneratedInfo { annotations };
            let bytes = wire::generated_info_to_wire(&info).map_err(|source| {
                GenerateError::Serialize {
                    file: file.name.clone(),
                    source,
                }
            })?;
            let meta_path = package_dir.join(format!("{class_name}.java.meta"));
            fs::write(&meta_path, bytes)?;
            Some(meta_path)
        } else {
            None
        };

        Ok(GeneratedArtifacts {
            source_path,
            annotation_path,
        })
    }

    fn resolve_dependencies(
        &mut self,
        file: &SchemaFile,
    ) -> Result<Vec<DependencyRef>, GenerateError> {
        if self.options.restricted_runtime_mode {
            /* Restricted runtimes rebuild without dependency wiring */
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(file.dependencies.len());
        for dependency in &file.dependencies {
            let dep_file = self.set.require(dependency, &file.name)?;
            out.push(DependencyRef {
                qualified_holder: self.resolver.qualified_holder_name(dep_file)?,
            });
        }
        Ok(out)
    }

    fn emit_header(&self, printer: &mut Printer, file: &SchemaFile, namespace: &str) {
        printer.print(
            "// Generated by descwire. DO NOT EDIT!\n\
             // source: $filename$\n\
             // descwire version: $version$\n\n",
            &[
                ("filename", file.name.as_str()),
                ("version", env!("CARGO_PKG_VERSION")),
            ],
        );
        if !namespace.is_empty() {
            printer.print("package $package$;\n\n", &[("package", namespace)]);
        }
    }

    fn emit_holder_class(
        &self,
        printer: &mut Printer,
        file: &SchemaFile,
        class_name: &str,
        groups: &[ChunkGroup],
        dependencies: &[DependencyRef],
    ) {
        printer.print(
            "public final class $classname$ {\n",
            &[("classname", class_name)],
        );
        printer.annotate("classname", &file.name);
        printer.print(
            "  /* Assigned exactly once, by the static initializer below;\n\
             \x20  * the class loader guarantees it runs a single time. */\n\
             \x20 public static $runtime$\n\
             \x20     descriptor;\n",
            &[("runtime", RUNTIME_DESCRIPTOR)],
        );

        printer.print("  static {\n", &[]);
        printer.indent();
        printer.indent();
        self.emit_schema_data(printer, groups);
        self.emit_build_call(printer, dependencies);
        printer.outdent();
        printer.outdent();
        printer.print("  }\n}\n", &[]);
    }

    fn emit_schema_data(&self, printer: &mut Printer, groups: &[ChunkGroup]) {
        printer.print("java.lang.String[] schemaData = {\n", &[]);
        printer.indent();
        for (group_idx, group) in groups.iter().enumerate() {
            if group_idx > 0 {
                printer.print(",\n", &[]);
            }
            for (chunk_idx, chunk) in group.chunks.iter().enumerate() {
                if chunk_idx > 0 {
                    printer.print(" +\n", &[]);
                }
                printer.print("\"$data$\"", &[("data", chunk.as_str())]);
            }
        }
        printer.outdent();
        printer.print("\n};\n", &[]);
    }

    fn emit_build_call(&self, printer: &mut Printer, dependencies: &[DependencyRef]) {
        printer.print(
            "descriptor = $runtime$\n",
            &[("runtime", RUNTIME_DESCRIPTOR)],
        );
        if self.options.restricted_runtime_mode {
            printer.print("  .buildFrom(schemaData);\n", &[]);
            return;
        }
        printer.print(
            "  .buildFrom(schemaData,\n\
             \x20   new $runtime$[] {\n",
            &[("runtime", RUNTIME_DESCRIPTOR)],
        );
        for dependency in dependencies {
            printer.print(
                "      $dependency$.descriptor,\n",
                &[("dependency", dependency.qualified_holder.as_str())],
            );
        }
        printer.print("    });\n", &[]);
    }
}
