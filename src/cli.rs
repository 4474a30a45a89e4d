use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "duelstats", version, about = "Card-game match history stats CLI")]
pub struct Args {
    #[arg(long, global = true, help = "Output raw JSON instead of tables")]
    pub json: bool,

    #[arg(
        long = "data-dir",
        global = true,
        help = "Data directory (default: $DUELSTATS_DATA_DIR, then ./data)"
    )]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute stats artifacts for a season range; missing season files are
    /// skipped, malformed ones reported.
    Analyze {
        /// First season of the range (inclusive)
        #[arg(long, default_value_t = 18)]
        from: u32,

        /// Last season of the range (inclusive)
        #[arg(long, default_value_t = 41)]
        to: u32,

        /// Analyze a single season instead of the range
        #[arg(long)]
        season: Option<u32>,
    },

    /// Print one season's stats artifact.
    Show {
        #[arg(long)]
        season: u32,
    },

    /// Roll up every stats artifact in the data directory.
    Totals {
        /// Running cumulative rows instead of per-season rows
        #[arg(long, default_value_t = false)]
        cumulative: bool,
    },
}
