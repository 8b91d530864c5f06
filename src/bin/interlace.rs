//! Interlace CLI
//!
//! Validates documents against schema files and converts documents
//! between JSON text and the binary encoding. Presentation lives here;
//! the library only returns structured data.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use interlace::{codec, Schema};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "interlace")]
#[command(about = "Validate documents against schemas and convert them to binary")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON document against a schema file
    Validate {
        /// Path to the schema (JSON)
        #[arg(short, long)]
        schema: PathBuf,
        /// Path to the document (JSON)
        document: PathBuf,
        /// Print the violations as a JSON array instead of text
        #[arg(long)]
        json: bool,
    },

    /// Encode a JSON document into the binary format
    Encode {
        /// Path to the document (JSON)
        input: PathBuf,
        /// Output file; stdout as hex when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a binary file back into JSON
    Decode {
        /// Path to the encoded file
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Validate {
            schema,
            document,
            json,
        } => {
            let schema_text = fs::read_to_string(&schema)
                .with_context(|| format!("reading schema {}", schema.display()))?;
            let schema = Schema::parse(&schema_text).context("loading schema")?;

            let doc_text = fs::read_to_string(&document)
                .with_context(|| format!("reading document {}", document.display()))?;
            let doc: serde_json::Value =
                serde_json::from_str(&doc_text).context("parsing document")?;

            let errors = schema.validate(&doc);
            if errors.is_empty() {
                println!("✅ Document is valid");
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            } else {
                println!("❌ Document is invalid:");
                for error in &errors {
                    println!("  - {error}");
                }
            }
            std::process::exit(1);
        }

        Commands::Encode { input, output } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let doc: serde_json::Value = serde_json::from_str(&text).context("parsing document")?;

            let encoded = codec::encode(&doc).context("encoding document")?;
            let json_size = serde_json::to_vec(&doc)?.len();
            tracing::debug!(binary = encoded.len(), json = json_size, "encoded document");

            match output {
                Some(path) => {
                    fs::write(&path, &encoded)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {} bytes to {}", encoded.len(), path.display());
                }
                None => {
                    for byte in &encoded {
                        print!("{byte:02x}");
                    }
                    println!();
                }
            }
            println!("JSON size:   {json_size} bytes");
            println!("Binary size: {} bytes", encoded.len());
            Ok(())
        }

        Commands::Decode { input } => {
            let bytes =
                fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let doc = codec::decode(&bytes).context("decoding document")?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
    }
}
