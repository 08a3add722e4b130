//! # loadspec CLI
//!
//! Supported commands:
//! - `parse`: extract endpoint descriptors from an OpenAPI file and print them as JSON.
//! - `serve`: run the HTTP upload service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loadspec_core::LoadspecConfig;
use loadspec_openapi::OpenApiParser;
use loadspec_telemetry::{extraction_span, init_telemetry, record_extraction_outcome};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "OpenAPI endpoint extraction for load testing")]
struct Cli {
    /// Path to a loadspec.toml (defaults to searching the current directory and parents)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the endpoint descriptors of an OpenAPI document as JSON.
    Parse {
        /// JSON or YAML OpenAPI document
        file: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve the upload API.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LoadspecConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_telemetry(&config.observability);

    match cli.command {
        Commands::Parse { file, pretty } => {
            let output = parse_file(&file, pretty)?;
            println!("{}", output);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            loadspec_server::serve(&config.server).await?;
        }
    }

    Ok(())
}

fn parse_file(file: &Path, pretty: bool) -> Result<String> {
    let source = file.display().to_string();
    let len = std::fs::metadata(file).map(|m| m.len() as usize).unwrap_or(0);
    let span = extraction_span(&source, len);

    let result = span.in_scope(|| OpenApiParser::from_file(file).map(|parser| parser.parse()));
    record_extraction_outcome(&span, result.as_ref().map(Vec::len));
    let endpoints = result.with_context(|| format!("Failed to parse {}", source))?;

    let output = if pretty {
        serde_json::to_string_pretty(&endpoints)?
    } else {
        serde_json::to_string(&endpoints)?
    };
    Ok(output)
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
    fn test_parse_subcommand_args() {
        let cli = Cli::try_parse_from(["loadspec", "parse", "api.yaml", "--pretty"]).unwrap();
        match cli.command {
            Commands::Parse { file, pretty } => {
                assert_eq!(file, PathBuf::from("api.yaml"));
                assert!(pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_file_outputs_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.yaml");
        std::fs::write(&path, "paths:\n  /ping:\n    get:\n      summary: Ping\n").unwrap();

        let output = parse_file(&path, false).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["path"], "/ping");
        assert_eq!(json[0]["requestBody"], serde_json::Value::Null);
    }
}
