use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use clap::{Parser, Subcommand};

use urlshort::config::loader::read_redirect_file;
use urlshort::redirect::yaml::{self, records_to_map};
use urlshort::redirect::{DefaultHandler, Handler, ParseMode};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "urlshort-cli")]
#[command(about = "Offline checks for urlshort redirect files", long_about = None)]
struct Cli {
    /// Reject records with a missing path or url
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a redirect file and print the resulting mapping
    Validate {
        file: PathBuf,

        /// Print the mapping as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what a path would resolve to
    Resolve { file: PathBuf, path: String },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let output = match cli.command {
        Commands::Validate { file, json } => validate(&file, mode, json)?,
        Commands::Resolve { file, path } => resolve(&file, &path, mode)?,
    };
    println!("{output}");

    Ok(())
}

fn validate(file: &Path, mode: ParseMode, json: bool) -> CliResult<String> {
    let payload = read_redirect_file(file)?;
    let records = yaml::parse_records(&payload, mode)?;
    let count = records.len();
    let mapping: BTreeMap<String, String> = records_to_map(records).into_iter().collect();

    if json {
        return Ok(serde_json::to_string_pretty(&mapping)?);
    }

    let mut lines: Vec<String> = mapping
        .iter()
        .map(|(path, url)| format!("{path} -> {url}"))
        .collect();
    lines.push(format!("{} record(s), {} unique path(s)", count, mapping.len()));
    Ok(lines.join("\n"))
}

fn resolve(file: &Path, path: &str, mode: ParseMode) -> CliResult<String> {
    let payload = read_redirect_file(file)?;
    let handler = yaml::build_with_mode(&payload, mode, Arc::new(DefaultHandler::default()))?;

    let response = handler.handle(Request::builder().uri(path).body(Body::empty())?);
    Ok(match response.headers().get(header::LOCATION) {
        Some(location) => format!("{} -> {}", response.status(), location.to_str()?),
        None => format!("{} (no redirect for {path})", response.status()),
    })
}
