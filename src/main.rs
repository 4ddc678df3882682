use clap::Parser;

use docstamp_lib::cli::{self, Cli};
use docstamp_lib::config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docstamp_lib::init_tracing();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);
    cli::run(cli)
}
