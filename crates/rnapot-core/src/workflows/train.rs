use crate::core::io::profile::{ProfileManifest, ProfileStore};
use crate::core::models::atom::AtomRecord;
use crate::core::potential::derivation::derive_profiles;
use crate::core::potential::histogram::DistanceHistograms;
use crate::core::potential::params::ModelParameters;
use crate::core::potential::profile::ProfileSet;
use crate::engine::config::TrainConfig;
use crate::engine::corpus::discover_structures;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::tasks::accumulation::structure_histograms;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct TrainResult {
    pub profiles: ProfileSet,
    pub structures: usize,
    pub skipped: Vec<PathBuf>,
    pub observed_pairs: u64,
    pub output_dir: PathBuf,
}

/// Trains profiles from an in-memory corpus, one atom list per structure.
///
/// The result does not depend on the order of the structures.
pub fn train_profiles<'a, I>(structures: I, params: &ModelParameters) -> ProfileSet
where
    I: IntoIterator<Item = &'a [AtomRecord]>,
{
    let histograms = structures
        .into_iter()
        .map(|atoms| structure_histograms(atoms, params))
        .fold(DistanceHistograms::for_params(params), |mut acc, h| {
            acc.merge(&h);
            acc
        });
    derive_profiles(&histograms, params)
}

/// Trains profiles from the structure files in `config.corpus_dir` and saves them, together
/// with a manifest of the parameters used, to `config.output_dir`.
#[instrument(skip_all, name = "training_workflow")]
pub fn run(config: &TrainConfig, reporter: &ProgressReporter) -> Result<TrainResult, EngineError> {
    let params = &config.parameters;

    let paths = reporter.phase("Discovering structures", || {
        discover_structures(&config.corpus_dir, &[])
    })?;
    info!(
        structures = paths.len(),
        corpus = ?config.corpus_dir,
        "Starting training."
    );

    let corpus = reporter.phase("Accumulating histograms", || {
        tasks::accumulation::run(
            &paths,
            params,
            config.keep_going,
            &config.corpus_dir,
            reporter,
        )
    })?;

    let profiles = reporter.phase("Deriving potentials", || {
        Ok::<_, EngineError>(derive_profiles(&corpus.histograms, params))
    })?;

    reporter.phase("Saving profiles", || {
        let store = ProfileStore::new(&config.output_dir);
        store.save_all(&profiles)?;
        store.save_manifest(&ProfileManifest {
            parameters: *params,
            training_structures: corpus.structures,
            observed_pairs: corpus.histograms.total(),
        })?;
        Ok::<_, EngineError>(())
    })?;

    reporter.report(Progress::Message(format!(
        "Trained {} profiles from {} structures",
        profiles.len(),
        corpus.structures
    )));
    info!(
        profiles = profiles.len(),
        structures = corpus.structures,
        skipped = corpus.skipped.len(),
        output = ?config.output_dir,
        "Training complete."
    );

    Ok(TrainResult {
        profiles,
        structures: corpus.structures,
        skipped: corpus.skipped,
        observed_pairs: corpus.histograms.total(),
        output_dir: config.output_dir.clone(),
    })
}
