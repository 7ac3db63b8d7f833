use super::config::ConfigError;
use crate::core::io::profile::ProfileError;
use crate::core::io::scores::ScoreSinkError;
use crate::core::io::structure::StructureError;
use crate::core::models::pair::PairCategory;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input directory does not exist: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("No eligible structure files found in {}", .path.display())]
    EmptyCorpus { path: PathBuf },

    #[error("No trained profile for pair category {category}")]
    UnprofiledCategory { category: PairCategory },

    #[error("Failed to read structure {}: {source}", .path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: StructureError,
    },

    #[error("Profile store error: {source}")]
    Profile {
        #[from]
        source: ProfileError,
    },

    #[error("Score output error: {source}")]
    ScoreSink {
        #[from]
        source: ScoreSinkError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("I/O error while scanning {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
