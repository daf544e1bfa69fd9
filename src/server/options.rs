use std::path::PathBuf;

use clap::Parser;

/// The authoritative Nuggets server: `nuggets-server map.txt [seed]`.
#[derive(Clone, Debug, Parser)]
pub struct ServerOptions {
    /// Path to the map file.
    pub map: PathBuf,

    /// Seed for the game's dice; defaults to the process id.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub seed: Option<u64>,

    #[arg(short, long)]
    pub log_level: Option<String>,
}
