use crate::core::io::scores::StructureScore;
use crate::core::io::structure::read_structure;
use crate::core::models::atom::AtomRecord;
use crate::core::models::pair::PairCategory;
use crate::core::potential::geometry::for_each_residue_distance;
use crate::core::potential::params::ModelParameters;
use crate::core::potential::profile::ProfileSet;
use crate::engine::config::MissingProfilePolicy;
use crate::engine::corpus::structure_name;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sums interpolated profile values over the qualifying residue pairs of a structure.
///
/// Profiles are read-only, so one scorer can be shared by any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    profiles: &'a ProfileSet,
    params: &'a ModelParameters,
    policy: MissingProfilePolicy,
}

impl<'a> Scorer<'a> {
    pub fn new(
        profiles: &'a ProfileSet,
        params: &'a ModelParameters,
        policy: MissingProfilePolicy,
    ) -> Self {
        Self {
            profiles,
            params,
            policy,
        }
    }

    /// Scores one structure. An empty atom list scores `0.0`.
    ///
    /// # Errors
    ///
    /// Under [`MissingProfilePolicy::Error`], returns [`EngineError::UnprofiledCategory`] for
    /// the first pair whose category has no profile.
    pub fn score(&self, atoms: &[AtomRecord]) -> Result<f64, EngineError> {
        let mut total = 0.0;
        let mut unprofiled: Option<PairCategory> = None;
        let mut ignored_pairs = 0usize;

        for_each_residue_distance(atoms, self.params, |pair| {
            let category = pair.category();
            match self.profiles.get(&category) {
                Some(profile) => total += profile.score_at(pair.distance),
                None => {
                    unprofiled.get_or_insert(category);
                    ignored_pairs += 1;
                }
            }
        });

        if let Some(category) = unprofiled {
            match self.policy {
                MissingProfilePolicy::Error => {
                    return Err(EngineError::UnprofiledCategory { category });
                }
                MissingProfilePolicy::Zero => {
                    trace!(ignored_pairs, "Pairs without a profile contributed zero.");
                }
            }
        }
        Ok(total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    /// Scores in input order.
    pub scores: Vec<StructureScore>,
    pub skipped: Vec<PathBuf>,
}

fn load_and_score(path: &Path, scorer: &Scorer) -> Result<f64, EngineError> {
    let atoms = read_structure(path).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    scorer.score(&atoms)
}

/// Scores every structure in `paths`.
///
/// With `keep_going`, structures that cannot be read are skipped. Profile errors are always
/// fatal.
#[instrument(skip_all, name = "structure_scoring_task")]
pub fn run(
    paths: &[PathBuf],
    scorer: &Scorer,
    keep_going: bool,
    structures_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<ScoringOutcome, EngineError> {
    info!(structures = paths.len(), "Scoring structures.");
    reporter.report(Progress::TaskStart {
        total_steps: paths.len() as u64,
    });

    let score_one = |path: &PathBuf| {
        let result = load_and_score(path, scorer);
        reporter.report(Progress::TaskIncrement);
        result
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<f64, EngineError>> = paths.iter().map(score_one).collect();

    #[cfg(feature = "parallel")]
    let results: Vec<Result<f64, EngineError>> = paths.par_iter().map(score_one).collect();

    reporter.report(Progress::TaskFinish);

    let mut scores = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(score) => scores.push(StructureScore::new(structure_name(path), score)),
            Err(EngineError::Structure { path, source }) if keep_going => {
                warn!(?path, error = %source, "Skipping unreadable structure.");
                reporter.report(Progress::StructureSkipped {
                    reason: source.to_string(),
                    path: path.clone(),
                });
                skipped.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    if scores.is_empty() {
        return Err(EngineError::EmptyCorpus {
            path: structures_dir.to_path_buf(),
        });
    }

    info!(
        scored = scores.len(),
        skipped = skipped.len(),
        "Structure scoring complete."
    );
    Ok(ScoringOutcome { scores, skipped })
}
