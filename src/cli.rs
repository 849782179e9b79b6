//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use find_models::core::config::parse_threshold;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  find-models normalize zukiCuteILL_v40.safetensors
  find-models compare model_v1.safetensors model_v2.safetensors
  find-models compare a.safetensors b-sdxl --explain --json
  find-models pick zukiCuteILL_v40.safetensors --candidates results.json
  curl -s ... | find-models pick my_lora.safetensors
  find-models selftest               Run the built-in name pairs
  find-models config                 Show config path and thresholds
  find-models completions bash       Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Match local model file names against model-hosting listings",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the normalized form of each name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
        /// Print JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// Compare two names and print the similarity and match decision
    Compare {
        name1: String,
        name2: String,
        /// Match threshold (defaults to the interactive threshold, 0.9)
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Option<f64>,
        /// Show the metrics behind the score
        #[arg(long)]
        explain: bool,
        #[arg(long)]
        json: bool,
    },
    /// Pick the best candidate for a name from a JSON list of search results
    Pick {
        query: String,
        /// JSON file with [{"model_name": ..., "file_name": ...}] ('-' for stdin)
        #[arg(short, long, default_value = "-")]
        candidates: String,
        /// Confidence threshold (defaults to the match threshold, 0.85)
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in name pairs and report mismatches
    Selftest {
        /// Match threshold (defaults to the match threshold, 0.85)
        #[arg(short, long, value_parser = parse_threshold)]
        threshold: Option<f64>,
    },
    /// Show config path and effective thresholds
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
