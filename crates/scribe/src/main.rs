//! # Scribe CLI
//!
//! Supported commands:
//! - `generate`: route registry (+ declarations, definitions) -> OpenAPI document.
//! - `mine`: print the reference map mined from a declaration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scribe::config::{ConfigLoader, OutputFormat, ScribeConfig};
use scribe::telemetry::init_logging;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Generate OpenAPI documents from route registries")]
struct Cli {
    /// Configuration file (TOML or JSON).
    #[arg(short, long, global = true, env = "SCRIBE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an OpenAPI document from a route registry.
    Generate(GenerateArgs),
    /// Print the reference map mined from a declaration file as JSON.
    Mine {
        /// Declaration text file.
        file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Route registry: a JSON array of routes.
    #[arg(long)]
    routes: PathBuf,

    /// Declaration files mined for reference schemas, applied in order.
    #[arg(long = "declarations", value_name = "FILE")]
    declarations: Vec<PathBuf>,

    /// Component definitions: a JSON object of name to schema.
    #[arg(long)]
    definitions: Option<PathBuf>,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overriding the configuration.
    #[arg(long, value_enum)]
    format: Option<Format>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Self::Json,
            Format::Yaml => Self::Yaml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging.to_log_config()).context("failed to initialize logging")?;

    match cli.command {
        Commands::Generate(args) => generate(config, &args),
        Commands::Mine { file } => mine(&file),
    }
}

fn load_config(path: Option<&Path>) -> Result<ScribeConfig> {
    let mut loader = ConfigLoader::new().with_defaults().with_dotenv();
    if let Some(path) = path {
        loader = loader
            .with_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    }
    Ok(loader.with_env_prefix("SCRIBE").load()?)
}

fn generate(mut config: ScribeConfig, args: &GenerateArgs) -> Result<()> {
    if let Some(format) = args.format {
        config.output.format = format.into();
    }

    let routes = scribe::load_routes(&args.routes)?;
    let mut generator = scribe::generator_from_config(&config)?;

    for references in scribe::mine_declarations(&args.declarations)? {
        generator = generator.reference(references);
    }
    if let Some(path) = &args.definitions {
        generator = generator.definitions(scribe::load_definitions(path)?);
    }

    let document = generator.generate(&routes);
    let rendered = scribe::render(&document, &config.output)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
            info!(file = %path.display(), "Wrote OpenAPI document");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn mine(file: &Path) -> Result<()> {
    let mut mined = scribe::mine_declarations(&[file])?;
    let references = mined.pop().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&references)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::parse_from([
            "scribe",
            "generate",
            "--routes",
            "routes.json",
            "--declarations",
            "a.d.ts",
            "--declarations",
            "b.d.ts",
            "--format",
            "yaml",
        ]);

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.declarations.len(), 2);
        assert!(matches!(args.format, Some(Format::Yaml)));
        assert!(args.output.is_none());
    }
}
