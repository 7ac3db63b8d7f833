use crate::error::{CliError, Result};
use rnapot::engine::config::MissingProfilePolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileModelConfig {
    pub max_distance: Option<f64>,
    pub position_skip: Option<usize>,
    pub maximum_score: Option<f64>,
    pub bin_width: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTrainingConfig {
    pub keep_going: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScoringConfig {
    pub missing_profile: Option<MissingProfilePolicy>,
    pub exclude: Option<Vec<String>>,
    pub keep_going: Option<bool>,
}

/// The TOML configuration file. Every key is optional; absent keys fall back to the
/// built-in defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub model: Option<FileModelConfig>,
    pub training: Option<FileTrainingConfig>,
    pub scoring: Option<FileScoringConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rnapot.toml");
        fs::write(
            &path,
            r#"
            [model]
            max-distance = 25.0
            position-skip = 3
            maximum-score = 8.0
            bin-width = 0.5

            [training]
            keep-going = true

            [scoring]
            missing-profile = "error"
            exclude = ["native.pdb"]
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let model = config.model.unwrap();
        assert_eq!(model.max_distance, Some(25.0));
        assert_eq!(model.position_skip, Some(3));
        assert_eq!(model.maximum_score, Some(8.0));
        assert_eq!(model.bin_width, Some(0.5));
        assert_eq!(config.training.unwrap().keep_going, Some(true));
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.missing_profile, Some(MissingProfilePolicy::Error));
        assert_eq!(scoring.exclude, Some(vec!["native.pdb".to_string()]));
        assert_eq!(scoring.keep_going, None);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(FileConfig::from_file(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typo.toml");
        fs::write(&path, "[model]\nbin-widht = 0.5\n").unwrap();
        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
