use crate::core::potential::params::{ModelParameters, ParamsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid model parameters: {0}")]
    InvalidParameters(#[from] ParamsError),
    #[error("Unknown missing-profile policy '{0}' (expected 'zero' or 'error')")]
    UnknownPolicy(String),
}

/// How scoring treats a pair category for which no trained profile is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingProfilePolicy {
    /// The pair contributes nothing to the score.
    #[default]
    Zero,
    /// Scoring fails with [`crate::engine::error::EngineError::UnprofiledCategory`].
    Error,
}

impl FromStr for MissingProfilePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for MissingProfilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub corpus_dir: PathBuf,
    pub output_dir: PathBuf,
    pub parameters: ModelParameters,
    /// Skip unreadable structures instead of aborting the run.
    pub keep_going: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub profile_dir: PathBuf,
    pub structures_dir: PathBuf,
    pub parameters: ModelParameters,
    pub missing_profile: MissingProfilePolicy,
    /// File names (not paths) excluded from scoring.
    pub exclude: Vec<String>,
    pub keep_going: bool,
    /// Where to write the score table, if anywhere.
    pub output_path: Option<PathBuf>,
}

#[derive(Default)]
pub struct TrainConfigBuilder {
    corpus_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    parameters: Option<ModelParameters>,
    keep_going: bool,
}

impl TrainConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn corpus_dir(mut self, path: PathBuf) -> Self {
        self.corpus_dir = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn parameters(mut self, parameters: ModelParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn build(self) -> Result<TrainConfig, ConfigError> {
        let parameters = self
            .parameters
            .ok_or(ConfigError::MissingParameter("parameters"))?;
        parameters.validate()?;
        Ok(TrainConfig {
            corpus_dir: self
                .corpus_dir
                .ok_or(ConfigError::MissingParameter("corpus_dir"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            parameters,
            keep_going: self.keep_going,
        })
    }
}

#[derive(Default)]
pub struct ScoreConfigBuilder {
    profile_dir: Option<PathBuf>,
    structures_dir: Option<PathBuf>,
    parameters: Option<ModelParameters>,
    missing_profile: MissingProfilePolicy,
    exclude: Vec<String>,
    keep_going: bool,
    output_path: Option<PathBuf>,
}

impl ScoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_dir(mut self, path: PathBuf) -> Self {
        self.profile_dir = Some(path);
        self
    }
    pub fn structures_dir(mut self, path: PathBuf) -> Self {
        self.structures_dir = Some(path);
        self
    }
    pub fn parameters(mut self, parameters: ModelParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
    pub fn missing_profile(mut self, policy: MissingProfilePolicy) -> Self {
        self.missing_profile = policy;
        self
    }
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn build(self) -> Result<ScoreConfig, ConfigError> {
        let parameters = self
            .parameters
            .ok_or(ConfigError::MissingParameter("parameters"))?;
        parameters.validate()?;
        Ok(ScoreConfig {
            profile_dir: self
                .profile_dir
                .ok_or(ConfigError::MissingParameter("profile_dir"))?,
            structures_dir: self
                .structures_dir
                .ok_or(ConfigError::MissingParameter("structures_dir"))?,
            parameters,
            missing_profile: self.missing_profile,
            exclude: self.exclude,
            keep_going: self.keep_going,
            output_path: self.output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_builder_succeeds_with_required_fields() {
        let config = TrainConfigBuilder::new()
            .corpus_dir(PathBuf::from("corpus"))
            .output_dir(PathBuf::from("profiles"))
            .parameters(ModelParameters::default())
            .build()
            .unwrap();

        assert_eq!(config.corpus_dir, PathBuf::from("corpus"));
        assert_eq!(config.output_dir, PathBuf::from("profiles"));
        assert!(!config.keep_going);
    }

    #[test]
    fn train_builder_reports_first_missing_field() {
        let result = TrainConfigBuilder::new()
            .corpus_dir(PathBuf::from("corpus"))
            .parameters(ModelParameters::default())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("output_dir")));

        let result = TrainConfigBuilder::new()
            .corpus_dir(PathBuf::from("corpus"))
            .output_dir(PathBuf::from("profiles"))
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("parameters")));
    }

    #[test]
    fn builders_reject_invalid_parameters() {
        let parameters = ModelParameters {
            bin_width: 0.0,
            ..ModelParameters::default()
        };
        let result = ScoreConfigBuilder::new()
            .profile_dir(PathBuf::from("profiles"))
            .structures_dir(PathBuf::from("decoys"))
            .parameters(parameters)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidParameters(_))));
    }

    #[test]
    fn score_builder_defaults_to_zero_policy_and_no_exclusions() {
        let config = ScoreConfigBuilder::new()
            .profile_dir(PathBuf::from("profiles"))
            .structures_dir(PathBuf::from("decoys"))
            .parameters(ModelParameters::default())
            .build()
            .unwrap();

        assert_eq!(config.missing_profile, MissingProfilePolicy::Zero);
        assert!(config.exclude.is_empty());
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn score_builder_accumulates_exclusions() {
        let config = ScoreConfigBuilder::new()
            .profile_dir(PathBuf::from("profiles"))
            .structures_dir(PathBuf::from("decoys"))
            .parameters(ModelParameters::default())
            .exclude(["native.pdb"])
            .exclude(vec!["reference.cif".to_string()])
            .missing_profile(MissingProfilePolicy::Error)
            .build()
            .unwrap();

        assert_eq!(config.exclude, vec!["native.pdb", "reference.cif"]);
        assert_eq!(config.missing_profile, MissingProfilePolicy::Error);
    }

    #[test]
    fn missing_profile_policy_parses_case_insensitively() {
        assert_eq!("zero".parse(), Ok(MissingProfilePolicy::Zero));
        assert_eq!(" ERROR ".parse(), Ok(MissingProfilePolicy::Error));
        assert_eq!(
            "strict".parse::<MissingProfilePolicy>(),
            Err(ConfigError::UnknownPolicy("strict".to_string()))
        );
    }
}
