//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "icesync")]
#[command(about = "Sync the GRACE Antarctica ice mass series into a Carto table", version)]
pub(crate) struct Cli {
    /// Path to a TOML config file (skips the default search locations)
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Treat fetch-timeout exhaustion as a fatal error instead of an empty run
    #[arg(long)]
    pub(crate) strict: bool,

    /// Drop the destination table before syncing
    #[arg(long)]
    pub(crate) clear_table_first: bool,

    /// Overall deadline for retrieving the data file, in seconds
    #[arg(long, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Remote directory publishing the dataset
    #[arg(long, value_name = "URL")]
    pub(crate) source_url: Option<String>,
}
