//! bt-tree CLI
//!
//! Prints the objects of an S3 bucket as a folder tree.

use clap::Parser;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for the tree)
    run::init_logging(args.log_level)?;

    let summary = run::execute(args).await?;

    eprintln!();
    eprintln!("Listing completed:");
    eprintln!("  Prefixes: {}", summary.prefixes);
    eprintln!("  Files:    {}", summary.files);
    eprintln!("  Duration: {:.2}s", summary.elapsed.as_secs_f64());

    Ok(())
}
