use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{ModelArgs, ScoreArgs, TrainArgs};
use crate::error::{CliError, Result};
use rnapot::core::potential::params::ModelParameters;
use rnapot::engine::config::{
    MissingProfilePolicy, ScoreConfig, ScoreConfigBuilder, TrainConfig, TrainConfigBuilder,
};
use std::path::Path;
use std::str::FromStr;

/// Resolves the training configuration. Precedence, lowest first: built-in defaults, the
/// config file, `--set` values, dedicated flags.
pub fn build_train_config(args: &TrainArgs) -> Result<TrainConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let parameters = merge_parameters(&args.model, &file_config, &defaults);
    let training = file_config.training.take().unwrap_or_default();
    let keep_going = args.keep_going || training.keep_going.unwrap_or(defaults.keep_going);

    TrainConfigBuilder::new()
        .corpus_dir(args.input.clone())
        .output_dir(args.output.clone())
        .parameters(parameters)
        .keep_going(keep_going)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolves the scoring configuration with the same precedence as [`build_train_config`].
/// Exclusions from the file and the command line are combined.
pub fn build_score_config(args: &ScoreArgs) -> Result<ScoreConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let parameters = merge_parameters(&args.model, &file_config, &defaults);
    let scoring = file_config.scoring.take().unwrap_or_default();

    let missing_profile = if args.strict {
        MissingProfilePolicy::Error
    } else {
        scoring.missing_profile.unwrap_or(defaults.missing_profile)
    };
    let keep_going = args.keep_going || scoring.keep_going.unwrap_or(defaults.keep_going);

    let mut builder = ScoreConfigBuilder::new()
        .profile_dir(args.profiles.clone())
        .structures_dir(args.input.clone())
        .parameters(parameters)
        .missing_profile(missing_profile)
        .exclude(scoring.exclude.unwrap_or_default())
        .exclude(args.exclude.iter().cloned())
        .keep_going(keep_going);
    if let Some(output) = &args.output {
        builder = builder.output_path(output.clone());
    }
    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn merge_parameters(
    args: &ModelArgs,
    file_config: &FileConfig,
    defaults: &DefaultsConfig,
) -> ModelParameters {
    let model = file_config.model.clone().unwrap_or_default();
    ModelParameters {
        max_distance: args
            .max_distance
            .or(model.max_distance)
            .unwrap_or(defaults.max_distance),
        position_skip: args
            .position_skip
            .or(model.position_skip)
            .unwrap_or(defaults.position_skip),
        maximum_score: args
            .maximum_score
            .or(model.maximum_score)
            .unwrap_or(defaults.maximum_score),
        bin_width: args
            .bin_width
            .or(model.bin_width)
            .unwrap_or(defaults.bin_width),
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            kind, key, value_str
        ))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "model.max-distance" => {
                config.model.get_or_insert_with(Default::default).max_distance =
                    Some(parse_value(key, value_str, "float")?);
            }
            "model.position-skip" => {
                config.model.get_or_insert_with(Default::default).position_skip =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "model.maximum-score" => {
                config.model.get_or_insert_with(Default::default).maximum_score =
                    Some(parse_value(key, value_str, "float")?);
            }
            "model.bin-width" => {
                config.model.get_or_insert_with(Default::default).bin_width =
                    Some(parse_value(key, value_str, "float")?);
            }
            "training.keep-going" => {
                config.training.get_or_insert_with(Default::default).keep_going =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "scoring.keep-going" => {
                config.scoring.get_or_insert_with(Default::default).keep_going =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "scoring.missing-profile" => {
                let policy = MissingProfilePolicy::from_str(value_str)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .missing_profile = Some(policy);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_train_args() -> TrainArgs {
        TrainArgs {
            input: PathBuf::from("corpus"),
            output: PathBuf::from("profiles"),
            config: None,
            model: ModelArgs::default(),
            keep_going: false,
            set_values: vec![],
        }
    }

    fn base_score_args() -> ScoreArgs {
        ScoreArgs {
            profiles: PathBuf::from("profiles"),
            input: PathBuf::from("decoys"),
            output: None,
            config: None,
            model: ModelArgs::default(),
            strict: false,
            exclude: vec![],
            keep_going: false,
            no_echo: false,
            set_values: vec![],
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("rnapot.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn train_config_uses_defaults_without_file_or_overrides() {
        let config = build_train_config(&base_train_args()).unwrap();

        assert_eq!(config.parameters, ModelParameters::default());
        assert_eq!(config.corpus_dir, PathBuf::from("corpus"));
        assert_eq!(config.output_dir, PathBuf::from("profiles"));
        assert!(!config.keep_going);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let mut args = base_train_args();
        args.config = Some(write_config(
            dir.path(),
            "[model]\nbin-width = 0.5\nposition-skip = 2\n[training]\nkeep-going = true\n",
        ));

        let config = build_train_config(&args).unwrap();
        assert_eq!(config.parameters.bin_width, 0.5);
        assert_eq!(config.parameters.position_skip, 2);
        assert_eq!(config.parameters.max_distance, 20.0);
        assert!(config.keep_going);
    }

    #[test]
    fn set_values_override_file_and_flags_override_set_values() {
        let dir = tempdir().unwrap();
        let mut args = base_train_args();
        args.config = Some(write_config(dir.path(), "[model]\nmax-distance = 30.0\n"));
        args.set_values = vec![
            "model.max-distance=25".to_string(),
            "model.maximum-score=8.5".to_string(),
        ];
        args.model.maximum_score = Some(6.0);

        let config = build_train_config(&args).unwrap();
        assert_eq!(config.parameters.max_distance, 25.0);
        assert_eq!(config.parameters.maximum_score, 6.0);
    }

    #[test]
    fn invalid_parameters_are_a_config_error() {
        let mut args = base_train_args();
        args.model.bin_width = Some(-1.0);
        let result = build_train_config(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let mut args = base_train_args();
        args.set_values = vec!["model.bin-width".to_string()];
        assert!(matches!(build_train_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["model.bin-width=wide".to_string()];
        assert!(matches!(build_train_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["model.unknown=1".to_string()];
        assert!(matches!(build_train_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn score_config_combines_exclusions_and_policies() {
        let dir = tempdir().unwrap();
        let mut args = base_score_args();
        args.config = Some(write_config(
            dir.path(),
            "[scoring]\nexclude = [\"native.pdb\"]\nmissing-profile = \"zero\"\n",
        ));
        args.exclude = vec!["ref.cif".to_string()];
        args.output = Some(PathBuf::from("scores.csv"));

        let config = build_score_config(&args).unwrap();
        assert_eq!(config.exclude, vec!["native.pdb", "ref.cif"]);
        assert_eq!(config.missing_profile, MissingProfilePolicy::Zero);
        assert_eq!(config.output_path, Some(PathBuf::from("scores.csv")));

        args.set_values = vec!["scoring.missing-profile=error".to_string()];
        let config = build_score_config(&args).unwrap();
        assert_eq!(config.missing_profile, MissingProfilePolicy::Error);
    }

    #[test]
    fn strict_flag_forces_error_policy() {
        let mut args = base_score_args();
        args.set_values = vec!["scoring.missing-profile=zero".to_string()];
        args.strict = true;

        let config = build_score_config(&args).unwrap();
        assert_eq!(config.missing_profile, MissingProfilePolicy::Error);
    }

    #[test]
    fn score_keep_going_can_be_set() {
        let mut args = base_score_args();
        args.set_values = vec!["scoring.keep-going=true".to_string()];
        assert!(build_score_config(&args).unwrap().keep_going);
    }
}
