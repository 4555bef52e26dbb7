//! Hamper Forecast CLI
//!
//! Terminal dashboard over the food drive pickup records: a project overview,
//! an exploratory analysis view, and hamper demand prediction from a trained
//! sequence model.

use anyhow::Result;
use clap::Parser;

use hamper_forecast::cli::commands::{
    load_with_progress, model_loader, run_explore, run_interactive, run_overview, run_predict,
};
use hamper_forecast::cli::{Cli, Commands};
use hamper_forecast::utils::{print_banner, print_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        return run_interactive(&cli);
    };

    match command {
        Commands::Overview => {
            print_banner(env!("CARGO_PKG_VERSION"));
            run_overview();
        }
        Commands::Explore { export } => {
            print_banner(env!("CARGO_PKG_VERSION"));
            print_config(&cli.data, &cli.model, &cli.encoding);
            let dataset = load_with_progress(&cli)?;
            run_explore(&dataset, &cli.data, export.as_deref())?;
        }
        Commands::Predict(args) => {
            print_banner(env!("CARGO_PKG_VERSION"));
            let loader = model_loader(&cli);
            run_predict(args, &cli.model, loader.as_ref())?;
        }
    }

    Ok(())
}
