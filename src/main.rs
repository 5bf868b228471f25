mod app;
mod cli;
mod config;
mod consts;
mod error;
mod fetch;
mod records;
mod store;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;

use cli::Cli;
use config::Config;
use fetch::HttpTransport;
use store::carto::CartoClient;

fn main() -> ExitCode {
    // Show info-level progress by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match Config::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let store = CartoClient::new(
        &config.carto_user,
        &config.carto_key,
        config.api_base.as_deref(),
    );
    let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs));

    match app::run(&config, &store, &transport) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
