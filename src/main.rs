//! rdf-object: inspect and convert RDF documents through the object layer

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rdf_object::{Factory, Object, RdfFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rdf-object", version, about = "Browse RDF documents as objects")]
struct Cli {
    /// Factory configuration (YAML)
    #[arg(long, global = true, env = "RDF_OBJECT_CONFIG")]
    config: Option<PathBuf>,

    /// Base IRI for relative references
    #[arg(long, global = true)]
    base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Turtle,
    Ntriples,
    Rdfxml,
}

impl From<OutputFormat> for RdfFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::Ntriples => RdfFormat::NTriples,
            OutputFormat::Rdfxml => RdfFormat::RdfXml,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resources of a document as JSON
    Dump {
        /// Document to load
        file: PathBuf,

        /// Only resources of this type
        #[arg(long = "type")]
        type_iri: Option<String>,

        /// Depth of nested resources
        #[arg(long, default_value_t = 0)]
        recurse: usize,
    },
    /// Print statement and resource counts
    Stats {
        /// Document to load
        file: PathBuf,
    },
    /// Re-serialize a document
    Convert {
        /// Document to load
        file: PathBuf,

        /// Output file, format from its extension unless --format is given
        output: PathBuf,

        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut f = match &cli.config {
        Some(path) => Factory::from_config_file(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => Factory::new(),
    };

    match cli.command {
        Commands::Dump { file, type_iri, recurse } => {
            load(&mut f, &file, cli.base.as_deref())?;
            let objects = match type_iri {
                Some(type_iri) => Object::find_by_type(&f, &type_iri)?,
                None => Object::find_all(&f),
            };
            for obj in &objects {
                println!("{}", obj.dump(&f, recurse));
            }
            println!("{} statements", f.find_size());
        }
        Commands::Stats { file } => {
            load(&mut f, &file, cli.base.as_deref())?;
            println!("Statements: {}", f.find_size());
            println!("Resources:  {}", Object::find_all(&f).len());
        }
        Commands::Convert { file, output, format } => {
            load(&mut f, &file, cli.base.as_deref())?;
            f.save_to_file(&output, format.map(RdfFormat::from))
                .with_context(|| format!("writing {}", output.display()))?;
            println!("✓ Wrote {} statements to {}", f.find_size(), output.display());
        }
    }
    Ok(())
}

fn load(f: &mut Factory, file: &Path, base: Option<&str>) -> Result<usize> {
    f.load_from_file(file, base)
        .with_context(|| format!("loading {}", file.display()))
}
