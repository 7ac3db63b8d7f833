use super::histogram::{DistanceHistograms, Histogram};
use super::params::ModelParameters;
use super::profile::{PotentialProfile, ProfileSet};
use tracing::debug;

/// Normalizes a histogram so its bins sum to one. An empty histogram maps to all zeros.
pub fn frequencies(histogram: &Histogram) -> Vec<f64> {
    let total = histogram.total();
    if total == 0 {
        return vec![0.0; histogram.num_bins()];
    }
    let total = total as f64;
    histogram
        .counts()
        .iter()
        .map(|&count| count as f64 / total)
        .collect()
}

/// Log-odds score of one bin: `-ln(pair / reference)`.
///
/// Unobserved bins (either frequency zero) and anything that comes out non-finite or above
/// `maximum_score` are clamped to `maximum_score`. Negative scores are kept: they mark
/// distances where the pair is over-represented relative to the background.
#[inline]
pub fn derive_score(reference_freq: f64, pair_freq: f64, maximum_score: f64) -> f64 {
    if reference_freq == 0.0 || pair_freq == 0.0 {
        return maximum_score;
    }
    let score = -(pair_freq / reference_freq).ln();
    if !score.is_finite() || score > maximum_score {
        maximum_score
    } else {
        score
    }
}

/// Applies [`derive_score`] bin by bin. Both frequency series must come from histograms with
/// the same bin geometry; a shorter series is treated as zero in the missing bins.
pub fn derive_scores(reference_freq: &[f64], pair_freq: &[f64], maximum_score: f64) -> Vec<f64> {
    let num_bins = reference_freq.len().max(pair_freq.len());
    (0..num_bins)
        .map(|bin| {
            let reference = reference_freq.get(bin).copied().unwrap_or(0.0);
            let pair = pair_freq.get(bin).copied().unwrap_or(0.0);
            derive_score(reference, pair, maximum_score)
        })
        .collect()
}

/// Turns corpus-wide histograms into one potential profile per pair category.
pub fn derive_profiles(histograms: &DistanceHistograms, params: &ModelParameters) -> ProfileSet {
    let reference_freq = frequencies(histograms.reference());
    let mut profiles = ProfileSet::new();

    for (category, histogram) in histograms.iter_pairs() {
        let pair_freq = frequencies(histogram);
        let scores = derive_scores(&reference_freq, &pair_freq, params.maximum_score);
        debug!(
            category = %category,
            observations = histogram.total(),
            "Derived potential profile."
        );
        profiles.insert(category, PotentialProfile::new(scores, params.bin_width));
    }

    profiles
}
