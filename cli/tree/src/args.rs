//! CLI argument definitions for bt-tree.

use clap::{Parser, ValueEnum};

/// Print an S3 bucket as a folder tree.
///
/// Lists every object under the given prefixes and prints the result as
/// JSON on stdout. By default the keys are nested into folders; with
/// `--flat` each object is printed as one entry carrying its full key.
///
/// ## Examples
///
/// Whole bucket:
///   bt-tree -b my-bucket
///
/// Several prefixes merged into one tree:
///   bt-tree -b my-bucket -p photos/ -p docs/
///
/// Flat listing against LocalStack:
///   bt-tree -b my-bucket -p logs/ --flat --s3-endpoint http://localhost:4566
#[derive(Parser, Debug)]
#[command(name = "bt-tree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === S3 Configuration ===
    /// S3 bucket name
    #[arg(short, long, env = "BT_S3_BUCKET")]
    pub bucket: String,

    /// Key prefix to list (repeatable; defaults to the whole bucket)
    #[arg(short, long = "prefix")]
    pub prefixes: Vec<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "BT_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    // === Listing Options ===
    /// Keys requested per list call (must be >= 1)
    #[arg(long, default_value = "50", value_parser = parse_page_size)]
    pub page_size: u32,

    /// Print one entry per object instead of a nested tree
    #[arg(long)]
    pub flat: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Prefixes to list; the empty prefix when none were given.
    pub fn prefixes(&self) -> Vec<String> {
        if self.prefixes.is_empty() {
            vec![String::new()]
        } else {
            self.prefixes.clone()
        }
    }
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact JSON on a single line
    Jsonl,
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse a page size (1-1000).
fn parse_page_size(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(1..=1000).contains(&value) {
        return Err(format!("{} is not in 1..=1000", value));
    }
    Ok(value)
}
