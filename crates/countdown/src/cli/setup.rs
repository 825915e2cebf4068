use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use countdownapp::error::Result;
use countdownapp::model::{parse_instant, parse_target};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "countdown",
    bin_name = "countdown",
    version,
    disable_help_subcommand = true,
    after_help = "Running `countdown` with no subcommand lists every countdown."
)]
#[command(about = "Live countdowns to the events that matter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Countdown data file (overrides COUNTDOWN_DATA_FILE and countdown.toml)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_file: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List countdowns, soonest first
    #[command(alias = "ls")]
    List,

    /// Show one countdown in full
    #[command(alias = "view")]
    Show {
        /// Countdown id
        id: String,
    },

    /// Create a countdown
    #[command(alias = "new")]
    Add {
        /// Title (blank becomes "Untitled")
        title: String,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Change some fields of a countdown, keeping the rest
    Edit {
        /// Countdown id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Delete a countdown
    #[command(alias = "rm")]
    Delete {
        /// Countdown id
        id: String,
    },

    /// Print the stored countdowns as JSON
    Export,

    /// Re-render the countdowns every second
    Watch {
        /// Stop after this many ticks (runs until Ctrl-C otherwise)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
    },

    /// Create the data file if it does not exist yet
    Init,

    /// Show the effective configuration
    Config {
        /// Print a commented countdown.toml instead
        #[arg(long)]
        template: bool,
    },
}

/// Where a countdown points: a local date and time, or an absolute instant.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Target date in local time
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Target time of day in local time (defaults to 00:00)
    #[arg(long, value_name = "HH:MM", requires = "date")]
    pub time: Option<String>,

    /// Target as an RFC 3339 timestamp
    #[arg(long, value_name = "RFC3339", conflicts_with_all = ["date", "time"])]
    pub at: Option<String>,
}

impl TargetArgs {
    /// `None` when no target option was given.
    pub fn resolve(&self) -> Result<Option<DateTime<Utc>>> {
        if let Some(at) = &self.at {
            return parse_instant(at).map(Some);
        }
        match &self.date {
            Some(date) => parse_target(date, self.time.as_deref()).map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Emoji shown next to the title
    #[arg(long, short = 'e')]
    pub emoji: Option<String>,

    /// Accent color, e.g. "#FF6EC7"
    #[arg(long, short = 'c')]
    pub color: Option<String>,
}
