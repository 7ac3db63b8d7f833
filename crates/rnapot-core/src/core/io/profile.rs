use crate::core::models::pair::PairCategory;
use crate::core::potential::params::{ModelParameters, bin_center};
use crate::core::potential::profile::{PotentialProfile, ProfileSet};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const PROFILE_EXTENSION: &str = "txt";
pub const MANIFEST_FILE_NAME: &str = "model.toml";

// Tolerance when checking stored bin centers against the expected geometry.
const BIN_CENTER_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("Malformed profile line {line} in '{path}': {reason}")]
    Malformed {
        path: String,
        line: usize,
        reason: String,
    },
    #[error("Profile '{path}' contains no scores")]
    Empty { path: String },
    #[error(
        "Bin center mismatch in '{path}' at bin {bin}: found {found}, expected {expected} for bin width {bin_width}"
    )]
    BinMismatch {
        path: String,
        bin: usize,
        found: f64,
        expected: f64,
        bin_width: f64,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    ManifestParse {
        path: String,
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    ManifestSerialize(#[from] toml::ser::Error),
}

/// Metadata stored next to a profile set describing how it was trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileManifest {
    pub parameters: ModelParameters,
    pub training_structures: usize,
    pub observed_pairs: u64,
}

/// Directory-backed persistence for potential profiles.
///
/// Each pair category lives in its own `<LABEL>.txt` file. Lines are `bin_center<TAB>score`;
/// files holding a bare score per line are also accepted, with bin centers implied by the
/// bin width. Blank lines and lines starting with `#` are ignored.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    directory: PathBuf,
}

impl ProfileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, category: PairCategory) -> PathBuf {
        self.directory
            .join(format!("{}.{}", category.label(), PROFILE_EXTENSION))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(MANIFEST_FILE_NAME)
    }

    pub fn save(&self, category: PairCategory, profile: &PotentialProfile) -> Result<(), ProfileError> {
        self.ensure_directory()?;
        let path = self.path_for(category);
        let io_error = |source| ProfileError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        };

        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        for (center, score) in profile.knots() {
            writeln!(writer, "{}\t{}", center, score).map_err(io_error)?;
        }
        writer.flush().map_err(io_error)?;
        debug!(category = %category, path = ?path, "Saved profile.");
        Ok(())
    }

    pub fn save_all(&self, profiles: &ProfileSet) -> Result<(), ProfileError> {
        for (category, profile) in profiles.iter() {
            self.save(*category, profile)?;
        }
        info!(
            count = profiles.len(),
            directory = ?self.directory,
            "Saved profile set."
        );
        Ok(())
    }

    pub fn load(&self, category: PairCategory, bin_width: f64) -> Result<PotentialProfile, ProfileError> {
        let path = self.path_for(category);
        let path_str = path.to_string_lossy().to_string();
        let file = File::open(&path).map_err(|source| ProfileError::Io {
            path: path_str.clone(),
            source,
        })?;
        parse_profile(BufReader::new(file), bin_width, &path_str)
    }

    /// Loads every category that has a profile file. Missing files are not an error; they
    /// simply leave the category out of the returned set.
    pub fn load_all(&self, bin_width: f64) -> Result<ProfileSet, ProfileError> {
        let mut profiles = ProfileSet::new();
        for category in PairCategory::ALL {
            if !self.path_for(category).is_file() {
                debug!(category = %category, "No profile file for category.");
                continue;
            }
            profiles.insert(category, self.load(category, bin_width)?);
        }
        Ok(profiles)
    }

    pub fn save_manifest(&self, manifest: &ProfileManifest) -> Result<(), ProfileError> {
        self.ensure_directory()?;
        let path = self.manifest_path();
        let content = toml::to_string_pretty(manifest)?;
        fs::write(&path, content).map_err(|source| ProfileError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })
    }

    /// Reads the manifest if one exists.
    pub fn load_manifest(&self) -> Result<Option<ProfileManifest>, ProfileError> {
        let path = self.manifest_path();
        if !path.is_file() {
            return Ok(None);
        }
        let path_str = path.to_string_lossy().to_string();
        let content = fs::read_to_string(&path).map_err(|source| ProfileError::Io {
            path: path_str.clone(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ProfileError::ManifestParse {
                path: path_str,
                source,
            })
    }

    fn ensure_directory(&self) -> Result<(), ProfileError> {
        fs::create_dir_all(&self.directory).map_err(|source| ProfileError::Io {
            path: self.directory.to_string_lossy().to_string(),
            source,
        })
    }
}

fn parse_profile(
    reader: impl BufRead,
    bin_width: f64,
    path: &str,
) -> Result<PotentialProfile, ProfileError> {
    let mut scores = Vec::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line_res.map_err(|source| ProfileError::Io {
            path: path.to_string(),
            source,
        })?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let malformed = |reason: String| ProfileError::Malformed {
            path: path.to_string(),
            line: line_num,
            reason,
        };
        let parse_float = |token: &str| {
            token
                .parse::<f64>()
                .map_err(|_| malformed(format!("invalid number '{}'", token)))
        };

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let score = match tokens.as_slice() {
            [score] => parse_float(*score)?,
            [center, score] => {
                let found = parse_float(*center)?;
                let bin = scores.len();
                let expected = bin_center(bin, bin_width);
                if (found - expected).abs() > BIN_CENTER_TOLERANCE {
                    return Err(ProfileError::BinMismatch {
                        path: path.to_string(),
                        bin,
                        found,
                        expected,
                        bin_width,
                    });
                }
                parse_float(*score)?
            }
            _ => {
                return Err(malformed(format!(
                    "expected 1 or 2 columns, found {}",
                    tokens.len()
                )));
            }
        };
        if !score.is_finite() {
            return Err(malformed(format!("non-finite score {}", score)));
        }
        scores.push(score);
    }

    if scores.is_empty() {
        return Err(ProfileError::Empty {
            path: path.to_string(),
        });
    }
    Ok(PotentialProfile::new(scores, bin_width))
}
