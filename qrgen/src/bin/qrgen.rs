//! Command-line front end.
//!
//! Reads a JSON request from a file or stdin and writes the PNG (or just the
//! formatted payload). Failures are printed to stderr as an `ErrorResult`
//! JSON object.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use qr_payload::Payload;
use qr_types::{ColorMask, ErrorCode, ErrorCorrection, ErrorResult, EyeStyle, ModuleStyle};
use tracing_subscriber::EnvFilter;

use qrgen_lib::{GenerateRequest, QrGenerator};

#[derive(Parser)]
#[command(name = "qrgen", version, about = "Styled QR code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a request to PNG
    Render {
        /// JSON request file; stdin when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// PNG destination; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the encoded payload text without rendering
    Payload {
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// List accepted style, mask, eye and error correction names
    Styles,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Rejected(ErrorResult),
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

impl From<ErrorResult> for CliError {
    fn from(result: ErrorResult) -> Self {
        CliError::Rejected(result)
    }
}

impl CliError {
    fn to_result(&self) -> ErrorResult {
        match self {
            CliError::Rejected(result) => result.clone(),
            CliError::Json(_) => ErrorResult::new(ErrorCode::InvalidParameters, self.to_string()),
            CliError::Io(_) | CliError::Config(_) => {
                tracing::error!(error = %self, "Command failed");
                ErrorResult::from_code(ErrorCode::InternalError)
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let result = e.to_result();
            tracing::debug!(code = %result.code, "Command failed");
            match serde_json::to_string(&result) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{result}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Render { input, output } => render_cmd(input.as_deref(), output.as_deref()),
        Command::Payload { input } => payload_cmd(input.as_deref()),
        Command::Styles => styles_cmd(),
    }
}

fn render_cmd(input: Option<&Path>, output: Option<&Path>) -> Result<(), CliError> {
    let config = qrgen_lib::init_config()?;
    let request: GenerateRequest = serde_json::from_str(&read_input(input)?)?;
    let generated = QrGenerator::new(&config).generate(&request)?;

    match output {
        Some(path) => {
            std::fs::write(path, &generated.bytes)?;
            tracing::info!(
                path = %path.display(),
                version = generated.version,
                width = generated.width,
                "Wrote QR code"
            );
        }
        None => io::stdout().lock().write_all(&generated.bytes)?,
    }
    Ok(())
}

fn payload_cmd(input: Option<&Path>) -> Result<(), CliError> {
    let content: Payload = serde_json::from_str(&read_input(input)?)?;
    let payload = QrGenerator::default().format_payload(&content)?;
    println!("{payload}");
    Ok(())
}

fn styles_cmd() -> Result<(), CliError> {
    let listing = serde_json::json!({
        "style": ModuleStyle::names(),
        "color_mask": ColorMask::names(),
        "eye_style": EyeStyle::names(),
        "error_correction": ErrorCorrection::names(),
    });
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
