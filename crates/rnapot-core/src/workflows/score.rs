use crate::core::io::profile::ProfileStore;
use crate::core::io::scores::{StructureScore, write_scores_to_path};
use crate::core::models::pair::PairCategory;
use crate::core::potential::params::ModelParameters;
use crate::core::potential::profile::ProfileSet;
use crate::engine::config::{MissingProfilePolicy, ScoreConfig};
use crate::engine::corpus::discover_structures;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::tasks::scoring::Scorer;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ScoreResult {
    /// Sorted by structure name.
    pub scores: Vec<StructureScore>,
    pub skipped: Vec<PathBuf>,
    /// Categories without a profile in the profile directory.
    pub missing_categories: Vec<PairCategory>,
}

/// Loads profiles from `config.profile_dir` and scores every structure file in
/// `config.structures_dir`. The table is written to `config.output_path` when one is set.
///
/// Scoring with parameters other than those used for training gives meaningless numbers.
/// When the profile directory carries a manifest, a mismatch is logged but not rejected.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run(config: &ScoreConfig, reporter: &ProgressReporter) -> Result<ScoreResult, EngineError> {
    let params = &config.parameters;

    if !config.profile_dir.is_dir() {
        return Err(EngineError::MissingInput {
            path: config.profile_dir.clone(),
        });
    }
    let paths = reporter.phase("Discovering structures", || {
        discover_structures(&config.structures_dir, &config.exclude)
    })?;

    let profiles = reporter.phase("Loading profiles", || {
        load_profiles(&config.profile_dir, params, config.missing_profile)
    })?;
    let missing_categories = profiles.missing_categories();

    let scorer = Scorer::new(&profiles, params, config.missing_profile);
    let outcome = reporter.phase("Scoring structures", || {
        tasks::scoring::run(
            &paths,
            &scorer,
            config.keep_going,
            &config.structures_dir,
            reporter,
        )
    })?;

    let mut scores = outcome.scores;
    scores.sort_by(|a, b| a.structure.cmp(&b.structure));

    if let Some(output_path) = &config.output_path {
        write_scores_to_path(output_path, &scores)?;
        reporter.report(Progress::Message(format!(
            "Wrote {} scores to {}",
            scores.len(),
            output_path.display()
        )));
        info!(path = ?output_path, "Score table written.");
    }

    info!(
        scored = scores.len(),
        skipped = outcome.skipped.len(),
        "Scoring complete."
    );

    Ok(ScoreResult {
        scores,
        skipped: outcome.skipped,
        missing_categories,
    })
}

fn load_profiles(
    profile_dir: &Path,
    params: &ModelParameters,
    policy: MissingProfilePolicy,
) -> Result<ProfileSet, EngineError> {
    let store = ProfileStore::new(profile_dir);

    match store.load_manifest()? {
        Some(manifest) if manifest.parameters != *params => {
            warn!(
                trained = ?manifest.parameters,
                scoring = ?params,
                "Profiles were trained with different model parameters."
            );
        }
        Some(manifest) => {
            debug!(
                structures = manifest.training_structures,
                "Profile manifest matches scoring parameters."
            );
        }
        None => debug!("No profile manifest; parameters cannot be cross-checked."),
    }

    let profiles = store.load_all(params.bin_width)?;
    let missing = profiles.missing_categories();
    if !missing.is_empty() {
        let labels: Vec<String> = missing.iter().map(|c| c.label()).collect();
        match policy {
            MissingProfilePolicy::Zero => warn!(
                missing = %labels.join(","),
                "Some pair categories have no profile and will contribute zero."
            ),
            MissingProfilePolicy::Error => warn!(
                missing = %labels.join(","),
                "Some pair categories have no profile; structures containing them will fail."
            ),
        }
    }
    info!(profiles = profiles.len(), "Profiles loaded.");
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::fixtures::write_c3_prime_pdb;
    use crate::core::io::scores::read_scores_from_path;
    use crate::core::potential::profile::PotentialProfile;
    use crate::engine::config::ScoreConfigBuilder;
    use tempfile::{TempDir, tempdir};

    const TOLERANCE: f64 = 1e-9;

    fn params() -> ModelParameters {
        ModelParameters {
            max_distance: 20.0,
            position_skip: 1,
            maximum_score: 10.0,
            bin_width: 1.0,
        }
    }

    /// Profiles where every category scores `k` at bin center `k + 0.5`.
    fn write_ramp_profiles(dir: &Path, categories: &[PairCategory]) {
        let store = ProfileStore::new(dir);
        let ramp = PotentialProfile::new((0..20).map(|k| k as f64).collect(), 1.0);
        for category in categories {
            store.save(*category, &ramp).unwrap();
        }
    }

    fn write_decoys(dir: &Path) {
        write_c3_prime_pdb(
            &dir.join("native.pdb"),
            &[('A', "A", [0.0; 3]), ('A', "U", [0.0, 0.0, 1.5])],
        );
        write_c3_prime_pdb(
            &dir.join("model_b.pdb"),
            &[('A', "A", [0.0; 3]), ('A', "U", [0.0, 0.0, 8.5])],
        );
        write_c3_prime_pdb(
            &dir.join("model_a.pdb"),
            &[('A', "G", [0.0; 3]), ('A', "G", [0.0, 0.0, 3.5])],
        );
    }

    fn setup(categories: &[PairCategory]) -> (TempDir, TempDir) {
        let profiles = tempdir().unwrap();
        write_ramp_profiles(profiles.path(), categories);
        let decoys = tempdir().unwrap();
        write_decoys(decoys.path());
        (profiles, decoys)
    }

    #[test]
    fn run_scores_sorted_by_name_and_writes_csv() {
        let (profiles, decoys) = setup(&PairCategory::ALL);
        let output = decoys.path().join("scores.csv");
        let config = ScoreConfigBuilder::new()
            .profile_dir(profiles.path().to_path_buf())
            .structures_dir(decoys.path().to_path_buf())
            .parameters(params())
            .exclude(["native.pdb"])
            .output_path(output.clone())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new()).unwrap();

        let names: Vec<&str> = result.scores.iter().map(|s| s.structure.as_str()).collect();
        assert_eq!(names, vec!["model_a.pdb", "model_b.pdb"]);
        assert!((result.scores[0].score - 3.0).abs() < TOLERANCE);
        assert!((result.scores[1].score - 8.0).abs() < TOLERANCE);
        assert!(result.missing_categories.is_empty());
        assert_eq!(read_scores_from_path(&output).unwrap(), result.scores);
    }

    #[test]
    fn missing_profiles_contribute_zero_by_default() {
        let au: PairCategory = "AU".parse().unwrap();
        let (profiles, decoys) = setup(&[au]);
        let config = ScoreConfigBuilder::new()
            .profile_dir(profiles.path().to_path_buf())
            .structures_dir(decoys.path().to_path_buf())
            .parameters(params())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.scores.len(), 3);
        assert_eq!(result.scores[0].structure, "model_a.pdb");
        assert_eq!(result.scores[0].score, 0.0);
        assert_eq!(result.missing_categories.len(), PairCategory::COUNT - 1);
    }

    #[test]
    fn missing_profiles_fail_in_strict_mode() {
        let au: PairCategory = "AU".parse().unwrap();
        let (profiles, decoys) = setup(&[au]);
        let config = ScoreConfigBuilder::new()
            .profile_dir(profiles.path().to_path_buf())
            .structures_dir(decoys.path().to_path_buf())
            .parameters(params())
            .missing_profile(MissingProfilePolicy::Error)
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::UnprofiledCategory { .. })));
    }

    #[test]
    fn missing_profile_directory_is_missing_input() {
        let decoys = tempdir().unwrap();
        write_decoys(decoys.path());
        let config = ScoreConfigBuilder::new()
            .profile_dir(decoys.path().join("absent"))
            .structures_dir(decoys.path().to_path_buf())
            .parameters(params())
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(
            matches!(result, Err(EngineError::MissingInput { path }) if path == decoys.path().join("absent"))
        );
    }

    #[test]
    fn profiles_from_a_different_geometry_are_rejected() {
        let (profiles, decoys) = setup(&PairCategory::ALL);
        let config = ScoreConfigBuilder::new()
            .profile_dir(profiles.path().to_path_buf())
            .structures_dir(decoys.path().to_path_buf())
            .parameters(ModelParameters {
                bin_width: 0.5,
                ..params()
            })
            .build()
            .unwrap();

        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Profile { .. })));
    }
}
