//! Duration CLI
//!
//! One-shot mode:
//!   duration [--target UNIT] [--strict] [--data] <TEXT>...
//!
//! JSON-lines mode (no TEXT): every stdin line is a request
//!   {"id": 1, "input": "1h 30m", "options": {"target": "minute", "returnData": true}}
//! and produces one response line with either "result" or "error".
//!
//! Environment:
//! - DURATION_UNITS: path to a JSON unit table replacing the standard one
//! - DURATION_TARGET: default target unit
//! - DURATION_LOG: log level for stderr (error, warn, info, debug, trace)

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use duration_parser::{
    standard_registry, DurationParser, ErrorBody, ParseOptions, Parsed, RegistryError, UnitRegistry,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::Level;

const REQUEST_ERROR: &str = "REQUEST_ERROR";

const LONG_ABOUT: &str = "Convert free-form durations such as \"1h 30m\" or \"2,5 days\" into a number.

With TEXT, the words are joined with spaces and parsed once.
Without TEXT, every stdin line is read as a JSON request and answered with one JSON line.
Amounts starting with a minus sign go after --, e.g. `duration -- -5m`.";

#[derive(Parser, Debug)]
#[command(name = "duration", version, about = "Parse human-readable durations", long_about = LONG_ABOUT)]
struct Cli {
    #[arg(
        short = 't',
        long = "target",
        value_name = "UNIT",
        long_help = "Unit of the result. Defaults to DURATION_TARGET, or ms when that is unset."
    )]
    target: Option<String>,
    #[arg(
        short = 's',
        long = "strict",
        action = ArgAction::SetTrue,
        long_help = "Fail on unknown units instead of skipping them."
    )]
    strict: bool,
    #[arg(
        short = 'd',
        long = "data",
        action = ArgAction::SetTrue,
        long_help = "Print the total with every matched range as JSON."
    )]
    data: bool,
    #[arg(
        short = 'u',
        long = "units",
        action = ArgAction::SetTrue,
        conflicts_with_all = ["target", "strict", "data", "text"],
        long_help = "List the known units as JSON."
    )]
    units: bool,
    #[arg(value_name = "TEXT")]
    text: Vec<String>,
}

impl Cli {
    /// Pick the mode, layering the flags over the configured options
    fn into_command(self, base: ParseOptions) -> Command {
        if self.units {
            return Command::ListUnits;
        }
        if self.text.is_empty() {
            return Command::Serve;
        }

        let mut options = base;
        if let Some(target) = self.target {
            options.target = target;
        }
        if self.strict {
            options.ignore_error = false;
        }
        if self.data {
            options.return_data = true;
        }
        Command::Parse { text: self.text.join(" "), options }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cannot read unit table {path}: {source}")]
    UnitsFile { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Settings taken from the environment
#[derive(Debug, Clone, PartialEq)]
struct Config {
    units_path: Option<PathBuf>,
    default_target: Option<String>,
    log_level: Level,
}

impl Config {
    fn from_env() -> Result<Self, CliError> {
        Self::from_vars(
            env::var("DURATION_UNITS").ok(),
            env::var("DURATION_TARGET").ok(),
            env::var("DURATION_LOG").ok(),
        )
    }

    fn from_vars(units: Option<String>, target: Option<String>, log: Option<String>) -> Result<Self, CliError> {
        let log_level = match log.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(level) => level
                .parse::<Level>()
                .map_err(|_| CliError::Config(format!("unknown log level: {}", level)))?,
            None => Level::WARN,
        };

        Ok(Config {
            units_path: units.filter(|s| !s.is_empty()).map(PathBuf::from),
            default_target: target.filter(|s| !s.is_empty()),
            log_level,
        })
    }

    /// Load the custom unit table, if one is configured
    fn load_registry(&self) -> Result<Option<UnitRegistry>, CliError> {
        let Some(path) = &self.units_path else {
            return Ok(None);
        };
        let json = fs::read_to_string(path).map_err(|source| CliError::UnitsFile {
            path: path.clone(),
            source,
        })?;
        let registry = UnitRegistry::from_json(&json)?;
        tracing::info!(path = %path.display(), units = registry.len(), "loaded custom unit table");
        Ok(Some(registry))
    }

    /// Options used for every field a caller leaves out
    fn base_options(&self) -> ParseOptions {
        match &self.default_target {
            Some(target) => ParseOptions::new().with_target(target.as_str()),
            None => ParseOptions::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    ListUnits,
    Parse { text: String, options: ParseOptions },
    Serve,
}

/// Options as sent in a request; absent fields keep the configured value
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestOptions {
    target: Option<String>,
    ignore_error: Option<bool>,
    return_data: Option<bool>,
}

impl RequestOptions {
    fn merged_onto(self, base: &ParseOptions) -> ParseOptions {
        ParseOptions {
            target: self.target.filter(|t| !t.is_empty()).unwrap_or_else(|| base.target.clone()),
            ignore_error: self.ignore_error.unwrap_or(base.ignore_error),
            return_data: self.return_data.unwrap_or(base.return_data),
        }
    }
}

/// One JSON-lines request
#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<JsonValue>,
    #[serde(default)]
    input: JsonValue,
    #[serde(default)]
    options: Option<RequestOptions>,
}

/// One JSON-lines response
#[derive(Debug, Serialize)]
struct Response {
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Parsed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

fn handle_line(parser: &DurationParser<'_>, base: &ParseOptions, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "malformed request");
            return Response {
                id: None,
                result: None,
                error: Some(ErrorBody::new(REQUEST_ERROR, format!("Invalid request: {}", e))),
            };
        }
    };

    let options = request.options.unwrap_or_default().merged_onto(base);
    match parser.parse_value(&request.input, &options) {
        Ok(parsed) => Response { id: request.id, result: Some(parsed), error: None },
        Err(e) => Response { id: request.id, result: None, error: Some(ErrorBody::from(e)) },
    }
}

fn serve(parser: &DurationParser<'_>, base: &ParseOptions) -> Result<(), CliError> {
    let stdin = io::stdin();
    let reader = io::BufReader::new(stdin.lock());
    tracing::info!("waiting for requests on stdin");

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(parser, base, line);
        let json = serde_json::to_string(&response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        stdout.flush()?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

fn print_parsed(parsed: &Parsed) -> Result<(), CliError> {
    match parsed {
        Parsed::Time(time) => println!("{}", time),
        Parsed::Data(result) => {
            let json = serde_json::to_string_pretty(result)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_units(registry: &UnitRegistry) -> Result<(), CliError> {
    let units: Vec<_> = registry.units().collect();
    let json = serde_json::to_string_pretty(&units)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    println!("{}", json);
    Ok(())
}

fn run(config: &Config, cli: Cli) -> Result<ExitCode, CliError> {
    let custom = config.load_registry()?;
    let registry = custom.as_ref().unwrap_or_else(|| standard_registry());
    let parser = DurationParser::new(registry);
    let base = config.base_options();

    match cli.into_command(base.clone()) {
        Command::ListUnits => {
            print_units(registry)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Parse { text, options } => match parser.parse(&text, &options) {
            Ok(parsed) => {
                print_parsed(&parsed)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("error[{}]: {}", e.code(), e);
                Ok(ExitCode::from(1))
            }
        },
        Command::Serve => {
            serve(&parser, &base)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    // Usage errors and --help exit here, before any configuration is read
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level)
        .init();

    match run(&config, cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "duration failed");
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}
