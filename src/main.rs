use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use track_browser::cli::{Cli, run_with};

/// `RUST_LOG` wins over `--log-level`; logs go to stderr so stdout stays scriptable
fn configure_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(&cli.log_level);
    run_with(cli)
}
