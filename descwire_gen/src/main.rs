use clap::{Parser, Subcommand, ValueEnum};
use descwire_gen::cmds;
use descwire_gen::cmds::inspect::OutputFormat;
use descwire_gen::codegen::NamespaceStyle;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "descwire")]
#[command(about = "Descriptor embedding backend for the descwire schema compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate descriptor holder sources from schema files */
    Generate {
        /* Input YAML files containing schema descriptions */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported schema files */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Output directory for generated code */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /* Embed an empty payload instead of the serialized schema */
        #[arg(long = "strip-nonfunctional")]
        strip_nonfunctional: bool,

        /* Target a restricted runtime: omit dependency references from
         * the reconstruction call */
        #[arg(long = "restricted-runtime")]
        restricted_runtime: bool,

        /* Emit a position-annotation sidecar next to each generated file */
        #[arg(long = "annotate")]
        annotate: bool,

        /* How generated namespaces are derived from schema packages */
        #[arg(long = "namespace-style", value_enum, default_value = "schema-package")]
        namespace_style: NamespaceStyleArg,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Inspect schema files and report what would be embedded */
    Inspect {
        /* Input YAML files containing schema descriptions */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported schema files */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Report format */
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum NamespaceStyleArg {
    /* Use the schema package as the generated namespace */
    SchemaPackage,
    /* Prepend a "gen" segment to the schema package */
    Prefixed,
}

impl From<NamespaceStyleArg> for NamespaceStyle {
    fn from(style: NamespaceStyleArg) -> Self {
        match style {
            NamespaceStyleArg::SchemaPackage => NamespaceStyle::SchemaPackage,
            NamespaceStyleArg::Prefixed => NamespaceStyle::Prefixed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            files,
            include_dirs,
            output_dir,
            strip_nonfunctional,
            restricted_runtime,
            annotate,
            namespace_style,
            verbose,
        } => {
            let options = cmds::generate::options_from_flags(
                strip_nonfunctional,
                restricted_runtime,
                annotate,
                namespace_style.into(),
            );
            cmds::generate::run(files, include_dirs, output_dir, options, verbose)?;
        }

        Commands::Inspect {
            files,
            include_dirs,
            format,
        } => {
            cmds::inspect::run(files, include_dirs, format)?;
        }
    }

    Ok(())
}
