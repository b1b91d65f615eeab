//! Main execution logic for bt-tree CLI.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use bt_lister::{BucketTreeService, ListingConfig, S3Config, TreeCache, create_s3_client};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel, OutputFormat};

/// What a run produced, for the summary on stderr.
#[derive(Debug)]
pub struct RunSummary {
    pub prefixes: usize,
    pub files: usize,
    pub elapsed: Duration,
}

/// Initialize logging.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr); // Log to stderr so stdout is clean for output

    subscriber.init();

    Ok(())
}

/// Execute a listing with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    let started = Instant::now();
    let prefixes = args.prefixes();

    if args.flat && prefixes.len() > 1 {
        anyhow::bail!("--flat lists a single prefix, got {}", prefixes.len());
    }

    let mut s3_config = S3Config::new()
        .with_region(&args.region)
        .with_timeout(args.timeout_secs);

    if let Some(endpoint) = &args.s3_endpoint {
        s3_config = s3_config.with_endpoint(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        s3_config = s3_config.with_credentials(access_key, secret_key);
    }

    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    let s3_client = create_s3_client(&s3_config).await?;

    let service = BucketTreeService::new(s3_client, Arc::new(TreeCache::new()))
        .with_config(ListingConfig::new().with_page_size(args.page_size));

    info!(
        bucket = %args.bucket,
        prefixes = ?prefixes,
        flat = args.flat,
        "Listing bucket"
    );

    let files = if args.flat {
        let tree = service.list_folder(&args.bucket, &prefixes[0]).await?;
        write_output(&*tree, args.output_format)?;
        tree.leaf_count()
    } else {
        let tree = service.list(&args.bucket, &prefixes).await?;
        write_output(&tree, args.output_format)?;
        tree.leaf_count()
    };

    Ok(RunSummary {
        prefixes: prefixes.len(),
        files,
        elapsed: started.elapsed(),
    })
}

/// Write the tree to stdout in the requested format.
fn write_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut out, value)?,
        OutputFormat::Jsonl => serde_json::to_writer(&mut out, value)?,
    }

    writeln!(out)?;
    out.flush()?;

    Ok(())
}
