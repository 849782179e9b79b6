//! # find-models
//!
//! Command-line front end for the model-name matching engine: normalize names,
//! compare two names, pick the best search result for a local file, and run the
//! built-in regression cases.

mod cli;
mod run;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};
use find_models::core;
use find_models::core::config::Config;

/// Load thresholds (print user-friendly message; exit uses Display not Debug).
fn load_config() -> Config {
    core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    let result = match args.command {
        Commands::Normalize { names, json } => run::run_normalize(&names, json),
        Commands::Compare {
            name1,
            name2,
            threshold,
            explain,
            json,
        } => run::run_compare(&load_config(), &name1, &name2, threshold, explain, json),
        Commands::Pick {
            query,
            candidates,
            threshold,
            json,
        } => run::run_pick(&load_config(), &query, &candidates, threshold, json),
        Commands::Selftest { threshold } => run::run_selftest(&load_config(), threshold),
        Commands::Config => {
            run::run_config(&load_config());
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            cli::generate(shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
