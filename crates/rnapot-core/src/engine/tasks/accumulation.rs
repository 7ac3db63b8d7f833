use crate::core::io::structure::{StructureError, read_structure};
use crate::core::models::atom::AtomRecord;
use crate::core::potential::geometry::for_each_residue_distance;
use crate::core::potential::histogram::DistanceHistograms;
use crate::core::potential::params::ModelParameters;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Corpus-wide histograms together with what went into them.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusHistograms {
    pub histograms: DistanceHistograms,
    pub structures: usize,
    pub skipped: Vec<PathBuf>,
}

/// Histograms of a single structure's qualifying residue pairs.
pub fn structure_histograms(atoms: &[AtomRecord], params: &ModelParameters) -> DistanceHistograms {
    let mut histograms = DistanceHistograms::for_params(params);
    for_each_residue_distance(atoms, params, |pair| histograms.record(pair, params));
    histograms
}

/// Partial result of one worker. Combining two partials is associative and commutative in
/// everything but the reported failure, where the smallest path wins so the outcome does
/// not depend on scheduling.
struct Partial {
    histograms: DistanceHistograms,
    structures: usize,
    skipped: Vec<PathBuf>,
    failure: Option<(PathBuf, StructureError)>,
}

impl Partial {
    fn empty(params: &ModelParameters) -> Self {
        Self {
            histograms: DistanceHistograms::for_params(params),
            structures: 0,
            skipped: Vec::new(),
            failure: None,
        }
    }

    fn absorb(
        mut self,
        path: &Path,
        outcome: Result<DistanceHistograms, StructureError>,
        keep_going: bool,
        reporter: &ProgressReporter,
    ) -> Self {
        match outcome {
            Ok(histograms) => {
                self.histograms.merge(&histograms);
                self.structures += 1;
            }
            Err(source) if keep_going => {
                warn!(?path, error = %source, "Skipping unreadable structure.");
                reporter.report(Progress::StructureSkipped {
                    path: path.to_path_buf(),
                    reason: source.to_string(),
                });
                self.skipped.push(path.to_path_buf());
            }
            Err(source) => self.record_failure(path.to_path_buf(), source),
        }
        reporter.report(Progress::TaskIncrement);
        self
    }

    fn record_failure(&mut self, path: PathBuf, source: StructureError) {
        let replace = match &self.failure {
            Some((existing, _)) => path < *existing,
            None => true,
        };
        if replace {
            self.failure = Some((path, source));
        }
    }

    fn combine(mut self, other: Partial) -> Self {
        self.histograms.merge(&other.histograms);
        self.structures += other.structures;
        self.skipped.extend(other.skipped);
        if let Some((path, source)) = other.failure {
            self.record_failure(path, source);
        }
        self
    }
}

/// Smallest failing path seen so far. Once it is set, larger paths are not read: they cannot
/// change the reported failure. Paths below it are still read, so the smallest failure of the
/// whole corpus is always found whatever the scheduling.
struct FailureGate {
    smallest: Mutex<Option<PathBuf>>,
}

impl FailureGate {
    fn new() -> Self {
        Self {
            smallest: Mutex::new(None),
        }
    }

    fn should_read(&self, path: &Path) -> bool {
        match self.smallest.lock() {
            Ok(guard) => guard.as_deref().is_none_or(|failed| path < failed),
            Err(_) => true,
        }
    }

    fn record(&self, path: &Path) {
        if let Ok(mut guard) = self.smallest.lock() {
            if guard.as_deref().is_none_or(|failed| path < failed) {
                *guard = Some(path.to_path_buf());
            }
        }
    }
}

fn load_and_accumulate(
    path: &Path,
    params: &ModelParameters,
) -> Result<DistanceHistograms, StructureError> {
    let atoms = read_structure(path)?;
    Ok(structure_histograms(&atoms, params))
}

/// Reads one structure into `acc`. Without `keep_going`, a gate is consulted first and
/// updated on failure so the rest of the corpus is cut short.
fn visit(
    acc: Partial,
    path: &Path,
    params: &ModelParameters,
    gate: Option<&FailureGate>,
    reporter: &ProgressReporter,
) -> Partial {
    let Some(gate) = gate else {
        return acc.absorb(path, load_and_accumulate(path, params), true, reporter);
    };
    if !gate.should_read(path) {
        reporter.report(Progress::TaskIncrement);
        return acc;
    }
    let outcome = load_and_accumulate(path, params);
    if outcome.is_err() {
        gate.record(path);
    }
    acc.absorb(path, outcome, false, reporter)
}

/// Reads every structure in `paths` and merges their histograms.
///
/// Without `keep_going` the first unreadable structure (in path order) fails the task, and
/// structures after it in path order are no longer read. With it, unreadable structures are
/// skipped, and the task only fails if none could be read.
#[instrument(skip_all, name = "histogram_accumulation_task")]
pub fn run(
    paths: &[PathBuf],
    params: &ModelParameters,
    keep_going: bool,
    corpus_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<CorpusHistograms, EngineError> {
    info!(structures = paths.len(), keep_going, "Accumulating distance histograms.");
    reporter.report(Progress::TaskStart {
        total_steps: paths.len() as u64,
    });

    let failure_gate = FailureGate::new();
    let gate = (!keep_going).then_some(&failure_gate);

    #[cfg(not(feature = "parallel"))]
    let partial = paths.iter().fold(Partial::empty(params), |acc, path| {
        visit(acc, path, params, gate, reporter)
    });

    #[cfg(feature = "parallel")]
    let partial = paths
        .par_iter()
        .fold(
            || Partial::empty(params),
            |acc, path| visit(acc, path, params, gate, reporter),
        )
        .reduce(|| Partial::empty(params), Partial::combine);

    reporter.report(Progress::TaskFinish);

    if let Some((path, source)) = partial.failure {
        return Err(EngineError::Structure { path, source });
    }
    if partial.structures == 0 {
        return Err(EngineError::EmptyCorpus {
            path: corpus_dir.to_path_buf(),
        });
    }

    let mut skipped = partial.skipped;
    skipped.sort();

    info!(
        structures = partial.structures,
        skipped = skipped.len(),
        pairs = partial.histograms.total(),
        "Histogram accumulation complete."
    );

    Ok(CorpusHistograms {
        histograms: partial.histograms,
        structures: partial.structures,
        skipped,
    })
}
