// gitfolio: generates a GitHub profile README from live API data.

mod app;
mod cache;
mod config;
mod error;
mod fetch;
mod github;
mod render;

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use app::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "gitfolio", version, about = "Generate a GitHub profile README")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "gitfolio.toml")]
    config: PathBuf,

    /// Where to write the generated document.
    #[arg(short, long, default_value = "README.md")]
    output: PathBuf,

    /// Override the response cache directory.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Print the document to stdout instead of writing the output file.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = RunOptions {
        config_path: cli.config,
        output: cli.output,
        cache_dir: cli.cache_dir,
        dry_run: cli.dry_run,
    };

    if let Err(err) = app::run(options).await {
        error!(error = %err, "generation failed");
        std::process::exit(1);
    }
}
