use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use digest2graph::core::{DigestConverter, FileScanner};
use digest2graph::formatters::cypher::is_valid_label;
use digest2graph::formatters::json_compact::JSON_FILE;
use digest2graph::formatters::{JsonCompactFormatter, Neo4jFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "digest2graph",
    version,
    about = "Convert a source digest into Neo4j-ready graph CSVs"
)]
struct Cli {
    /// Digest file to convert
    #[arg(value_name = "DIGEST")]
    input: PathBuf,

    /// Directory that receives the generated files
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// Output format: neo4j (CSVs + import.cypher) or json
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Neo4j)]
    format: OutputFormat,

    /// Comma-separated file extensions parsed as Python
    #[arg(long, value_name = "EXTS", value_delimiter = ',', default_value = "py")]
    python_extensions: Vec<String>,

    /// Node label used by the generated Cypher script
    #[arg(long, value_name = "LABEL", default_value = "Entity", value_parser = parse_label)]
    entity_label: String,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Neo4j,
    Json,
}

fn parse_label(value: &str) -> Result<String, String> {
    if is_valid_label(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{value}' is not a valid label (letters, digits and '_', not starting with a digit)"
        ))
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        format,
        python_extensions,
        entity_label,
        ..
    } = cli;

    if !input.exists() {
        bail!("Digest not found: {}", input.display());
    }

    let scanner = FileScanner::new().with_python_extensions(python_extensions.as_slice());
    tracing::debug!(
        "Parsing extensions: {}",
        scanner.extensions().collect::<Vec<_>>().join(",")
    );

    let mut converter = DigestConverter::with_scanner(scanner);
    let graph = converter.convert_path(&input)?;

    match format {
        OutputFormat::Neo4j => {
            Neo4jFormatter::new()
                .with_entity_label(entity_label)
                .format_to_dir(&graph, &output)?;
        }
        OutputFormat::Json => {
            JsonCompactFormatter::new().format_to_file(&graph, &output.join(JSON_FILE))?;
        }
    }

    println!(
        "Written {} nodes and {} relationships to {}",
        graph.node_count(),
        graph.relationship_count(),
        output.display()
    );

    Ok(())
}
