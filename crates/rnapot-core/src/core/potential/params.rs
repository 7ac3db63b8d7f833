use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_DISTANCE: f64 = 20.0;
pub const DEFAULT_POSITION_SKIP: usize = 4;
pub const DEFAULT_MAXIMUM_SCORE: f64 = 10.0;
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParamsError {
    #[error("Maximum distance must be a positive finite number (got {0})")]
    InvalidMaxDistance(f64),
    #[error("Bin width must be a positive finite number (got {0})")]
    InvalidBinWidth(f64),
    #[error("Maximum score must be a finite number (got {0})")]
    InvalidMaximumScore(f64),
}

/// Geometry and clamping parameters shared by training and scoring.
///
/// A profile set is only meaningful when scored with the same parameters it was trained
/// with: the bin geometry and the pair-selection rule must agree between both phases.
/// Nothing enforces this automatically; the profile manifest records the training values so
/// that mismatches can at least be reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelParameters {
    /// Exclusive spatial cutoff for residue pairs, in Angstroms.
    pub max_distance: f64,
    /// Minimum sequence-index separation between the two residues of a pair.
    pub position_skip: usize,
    /// Upper clamp for derived scores.
    pub maximum_score: f64,
    /// Width of one distance bin, in Angstroms.
    pub bin_width: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            position_skip: DEFAULT_POSITION_SKIP,
            maximum_score: DEFAULT_MAXIMUM_SCORE,
            bin_width: DEFAULT_BIN_WIDTH,
        }
    }
}

impl ModelParameters {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(ParamsError::InvalidMaxDistance(self.max_distance));
        }
        if !(self.bin_width.is_finite() && self.bin_width > 0.0) {
            return Err(ParamsError::InvalidBinWidth(self.bin_width));
        }
        if !self.maximum_score.is_finite() {
            return Err(ParamsError::InvalidMaximumScore(self.maximum_score));
        }
        Ok(())
    }

    /// `ceil(max_distance / bin_width)`, never less than one.
    pub fn num_bins(&self) -> usize {
        ((self.max_distance / self.bin_width).ceil() as usize).max(1)
    }

    #[inline]
    pub fn max_distance_squared(&self) -> f64 {
        self.max_distance * self.max_distance
    }

    /// Maps a distance to its bin, folding overflow into the last bin.
    #[inline]
    pub fn bin_index(&self, distance: f64) -> usize {
        let raw = (distance / self.bin_width).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.num_bins() - 1)
        }
    }

    #[inline]
    pub fn bin_center(&self, index: usize) -> f64 {
        bin_center(index, self.bin_width)
    }
}

/// Representative distance of bin `index`: `(index + 0.5) * bin_width`.
#[inline]
pub fn bin_center(index: usize, bin_width: f64) -> f64 {
    (index as f64 + 0.5) * bin_width
}
