use crate::cli::ScoreArgs;
use crate::config::build_score_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use crate::utils::table::format_score_table;
use rnapot::core::models::pair::PairCategory;
use rnapot::engine::config::MissingProfilePolicy;
use rnapot::engine::progress::ProgressReporter;
use rnapot::workflows;
use tracing::{info, warn};

pub fn run(args: ScoreArgs, progress: CliProgressHandler) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let echo = !args.no_echo;
    let config = build_score_config(&args)?;
    info!(
        parameters = ?config.parameters,
        policy = %config.missing_profile,
        "Resolved scoring configuration."
    );

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    println!(
        "Scoring structures in {} with profiles from {}...",
        config.structures_dir.display(),
        config.profile_dir.display()
    );
    let result = workflows::score::run(&config, &reporter)?;

    if let Some(notice) =
        missing_profile_notice(&result.missing_categories, config.missing_profile)
    {
        println!("{}", notice);
    }
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

    if echo {
        print!("{}", format_score_table(&result.scores));
    }
    match &config.output_path {
        Some(path) => println!(
            "✓ Scored {} structure(s); table written to {}",
            result.scores.len(),
            path.display()
        ),
        None => println!("✓ Scored {} structure(s)", result.scores.len()),
    }
    Ok(())
}

/// Console line for pair types without a trained profile, worded for the active policy.
fn missing_profile_notice(
    missing: &[PairCategory],
    policy: MissingProfilePolicy,
) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let labels = missing
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");
    Some(match policy {
        MissingProfilePolicy::Zero => format!(
            "Warning: no profile for pair type(s) {}; they contributed zero.",
            labels
        ),
        MissingProfilePolicy::Error => format!(
            "Note: no profile for pair type(s) {}; no scored structure contained them.",
            labels
        ),
    })
}
