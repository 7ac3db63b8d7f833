use super::interpolation;
use super::params::bin_center;
use crate::core::models::pair::PairCategory;
use std::collections::BTreeMap;

/// The learned potential of one pair category: one score per distance bin.
///
/// Bin `k` is represented by its center `(k + 0.5) * bin_width`; lookups between centers are
/// linearly interpolated by [`PotentialProfile::score_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialProfile {
    scores: Vec<f64>,
    bin_width: f64,
}

impl PotentialProfile {
    pub fn new(scores: Vec<f64>, bin_width: f64) -> Self {
        Self { scores, bin_width }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[inline]
    pub fn bin_center(&self, index: usize) -> f64 {
        bin_center(index, self.bin_width)
    }

    /// `(bin_center, score)` pairs in bin order.
    pub fn knots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(|(k, &score)| (self.bin_center(k), score))
    }

    #[inline]
    pub fn score_at(&self, distance: f64) -> f64 {
        interpolation::interpolate(self, distance)
    }
}

/// Profiles keyed by pair category. Categories may be missing, e.g. when a profile
/// directory is incomplete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileSet {
    profiles: BTreeMap<PairCategory, PotentialProfile>,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: PairCategory, profile: PotentialProfile) {
        self.profiles.insert(category, profile);
    }

    pub fn get(&self, category: &PairCategory) -> Option<&PotentialProfile> {
        self.profiles.get(category)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairCategory, &PotentialProfile)> {
        self.profiles.iter()
    }

    pub fn missing_categories(&self) -> Vec<PairCategory> {
        PairCategory::ALL
            .iter()
            .filter(|c| !self.profiles.contains_key(c))
            .copied()
            .collect()
    }
}

impl FromIterator<(PairCategory, PotentialProfile)> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = (PairCategory, PotentialProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}
