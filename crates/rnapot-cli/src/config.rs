//! Layered configuration for the `train` and `score` commands: built-in defaults, an
//! optional TOML file, `--set KEY=VALUE` overrides and dedicated flags, in increasing order
//! of precedence.

mod builder;
mod defaults;
mod file;

pub use builder::{build_score_config, build_train_config};
