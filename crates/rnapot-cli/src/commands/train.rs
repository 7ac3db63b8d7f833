use crate::cli::TrainArgs;
use crate::config::build_train_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use rnapot::engine::progress::ProgressReporter;
use rnapot::workflows;
use tracing::{info, warn};

pub fn run(args: TrainArgs, progress: CliProgressHandler) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_train_config(&args)?;
    info!(parameters = ?config.parameters, "Resolved model parameters.");

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    println!("Training on structures in {}...", config.corpus_dir.display());
    let result = workflows::train::run(&config, &reporter)?;

    if !result.skipped.is_empty() {
        warn!(
            skipped = result.skipped.len(),
            "Some structures could not be read and were left out."
        );
        println!(
            "Warning: {} structure(s) could not be read and were skipped.",
            result.skipped.len()
        );
    }

    println!(
        "✓ Trained {} profiles from {} structure(s) ({} residue pairs) into {}",
        result.profiles.len(),
        result.structures,
        result.observed_pairs,
        result.output_dir.display()
    );
    Ok(())
}
