use crate::config::parse_threshold;
use crate::rating::RatingField;
use crate::types::ScorePolicy;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bridge_report")]
#[command(about = "Condition analysis of periodic bridge inspections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./bridge_report.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Inspection table exported as CSV
    #[arg(short, long, global = true, env = "BRIDGE_REPORT_INPUT")]
    pub input: Option<PathBuf>,

    /// Only keep inspections in this kommune (repeatable)
    #[arg(short = 'r', long = "region", global = true)]
    pub regions: Vec<String>,

    /// How records with missing ratings are scored
    #[arg(long, value_enum, global = true)]
    pub score_policy: Option<ScorePolicy>,

    /// Write the rows of the view to this file (.json for JSON, CSV otherwise)
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Counts and date range of the (filtered) table
    Summary,
    /// Distinct kommune values
    Regions,
    /// Distinct bridge registration numbers
    Bridges,
    /// Print the filtered table
    Raw,
    /// Bridges with the worst condition score
    Worst {
        /// Number of rows (defaults to top_n from the config)
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Rating and condition score of one bridge over time
    Trend {
        #[arg(short, long)]
        bridge: String,
        /// Rating field code, e.g. Fl or Bae
        #[arg(short, long)]
        element: RatingField,
    },
    /// Average rating per interval of years
    Intervals {
        #[arg(short, long)]
        element: RatingField,
        /// Restrict to one bridge (all bridges when omitted)
        #[arg(short, long)]
        bridge: Option<String>,
    },
    /// Ratings far from the mean inside a date window
    Outliers {
        #[arg(short, long)]
        element: RatingField,
        /// First inspection date, YYYY-MM-DD (defaults to the earliest)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last inspection date, YYYY-MM-DD (defaults to the latest)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Standard deviations from the mean (defaults to the config value)
        #[arg(short, long, value_parser = threshold_arg)]
        threshold: Option<f64>,
    },
    /// Menu-driven session (the default)
    Interactive,
}

fn threshold_arg(s: &str) -> Result<f64, String> {
    parse_threshold(s).map_err(|e| e.to_string())
}
