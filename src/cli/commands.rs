//! View runners shared by the subcommands and the interactive session

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::cli::{menu, predict_form, Cli, Page, PredictArgs};
use crate::pipeline::{
    load_dataset, predict_hampers, CachedLoader, Dataset, FreshLoader, ModelLoader, Prediction,
};
use crate::report::{display_overview, export_eda_report, EdaReport};
use crate::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_config,
    print_error, print_info, print_prediction, print_section_header, print_success,
    print_warning,
};

/// Loader selected by `--cache-model`
pub fn model_loader(cli: &Cli) -> Box<dyn ModelLoader> {
    if cli.cache_model {
        Box::new(CachedLoader::new())
    } else {
        Box::new(FreshLoader)
    }
}

/// Load the dataset behind a spinner and print its statistics
pub fn load_with_progress(cli: &Cli) -> Result<Dataset> {
    let spinner = create_spinner("Loading dataset...");
    match load_dataset(&cli.data, &cli.load_options()) {
        Ok(dataset) => {
            finish_with_success(&spinner, "Dataset loaded");
            println!("\n    {} Dataset Statistics:", style("✧").cyan());
            println!("      Rows: {}", dataset.height());
            println!("      Columns: {}", dataset.width());
            println!("      Estimated memory: {:.2} MB", dataset.estimated_size_mb());
            Ok(dataset)
        }
        Err(e) => {
            finish_with_error(&spinner, "Dataset could not be loaded");
            Err(e)
        }
    }
}

pub fn run_overview() {
    print_section_header("Islamic Family & Social Services Association");
    display_overview();
}

/// Render the exploration view, optionally exporting the aggregates
pub fn run_explore(dataset: &Dataset, data_path: &Path, export: Option<&Path>) -> Result<()> {
    let spinner = create_spinner("Deriving aggregates...");
    let report = EdaReport::derive(dataset);
    finish_with_success(&spinner, "Aggregates derived");

    report.display();

    let failures = report.failures();
    if !failures.is_empty() {
        print_warning(&format!(
            "{} section(s) could not be derived from this dataset",
            failures.len()
        ));
    }

    if let Some(path) = export {
        export_eda_report(&report, &data_path.display().to_string(), path)?;
        print_success(&format!("Aggregates exported to {}", path.display()));
    }

    Ok(())
}

/// Run one prediction request with a spinner around model loading and inference
pub fn run_predict(
    args: &PredictArgs,
    model_path: &Path,
    loader: &dyn ModelLoader,
) -> Result<Prediction> {
    let selections = args.selections();
    print_info(&format!(
        "{} | {} | {} | family of {} | {:04}-{:02}-{:02}",
        selections.special_event,
        selections.day_of_week,
        selections.status,
        selections.family_size,
        selections.year,
        selections.month,
        selections.day
    ));

    let spinner = create_spinner("Running model...");
    match predict_hampers(&selections, loader, model_path) {
        Ok(prediction) => {
            finish_with_success(&spinner, "Prediction complete");
            print_prediction(prediction.hampers);
            Ok(prediction)
        }
        Err(e) => {
            finish_with_error(&spinner, "Prediction failed");
            Err(e).with_context(|| format!("Prediction with model {} failed", model_path.display()))
        }
    }
}

/// Page loop of the interactive session.
///
/// The dataset is loaded once up front. Errors are printed and scoped to the
/// page that raised them; the session continues.
pub fn run_interactive(cli: &Cli) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.data, &cli.model, &cli.encoding);

    let dataset = load_with_progress(cli);
    if let Err(e) = &dataset {
        print_error(e);
    }
    let loader = model_loader(cli);

    let mut page = Page::Dashboard;
    loop {
        page = menu::select_page(page)?;
        match page {
            Page::Dashboard => run_overview(),
            Page::Exploration => match &dataset {
                Ok(dataset) => {
                    if let Err(e) = run_explore(dataset, &cli.data, None) {
                        print_error(&e);
                    }
                }
                Err(e) => print_error(e),
            },
            Page::Modeling => {
                let model_path = cli.model.clone();
                let result = predict_form::run_prediction_form(|selections| {
                    predict_hampers(selections, loader.as_ref(), &model_path).with_context(|| {
                        format!("Prediction with model {} failed", model_path.display())
                    })
                });
                if let Err(e) = result {
                    print_error(&e);
                }
            }
            Page::Quit => {
                println!("    {}", style("Goodbye.").dim());
                return Ok(());
            }
        }
    }
}
