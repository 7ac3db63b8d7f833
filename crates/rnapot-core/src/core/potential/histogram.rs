use super::geometry::PairDistance;
use super::params::ModelParameters;
use crate::core::models::pair::PairCategory;
use itertools::{EitherOrBoth, Itertools};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Per-bin distance counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(num_bins: usize) -> Self {
        Self {
            counts: vec![0; num_bins],
        }
    }

    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn increment(&mut self, bin: usize) {
        if bin >= self.counts.len() {
            self.counts.resize(bin + 1, 0);
        }
        self.counts[bin] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Element-wise sum. Histograms of different lengths are aligned at bin zero and the
    /// result takes the longer length, so the operation stays total, commutative and
    /// associative.
    pub fn merge(&mut self, other: &Histogram) {
        self.counts = self
            .counts
            .iter()
            .zip_longest(other.counts.iter())
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => a + b,
                EitherOrBoth::Left(a) | EitherOrBoth::Right(a) => *a,
            })
            .collect();
    }
}

/// The full set of histograms for one structure or one corpus: one per pair category plus the
/// pooled reference histogram.
///
/// Every recorded distance increments exactly one category histogram and the reference
/// histogram, in the same bin, so the reference total always equals the sum of the category
/// totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceHistograms {
    reference: Histogram,
    pairs: [Histogram; PairCategory::COUNT],
}

impl DistanceHistograms {
    pub fn new(num_bins: usize) -> Self {
        Self {
            reference: Histogram::new(num_bins),
            pairs: std::array::from_fn(|_| Histogram::new(num_bins)),
        }
    }

    pub fn for_params(params: &ModelParameters) -> Self {
        Self::new(params.num_bins())
    }

    /// Bins every pair distance into a fresh set of histograms.
    pub fn accumulate<I>(distances: I, params: &ModelParameters) -> Self
    where
        I: IntoIterator<Item = PairDistance>,
    {
        let mut histograms = Self::for_params(params);
        for pair in distances {
            histograms.record(pair, params);
        }
        histograms
    }

    #[inline]
    pub fn record(&mut self, pair: PairDistance, params: &ModelParameters) {
        let bin = params.bin_index(pair.distance);
        self.reference.increment(bin);
        self.pairs[pair.category().index()].increment(bin);
    }

    pub fn reference(&self) -> &Histogram {
        &self.reference
    }

    pub fn pair(&self, category: PairCategory) -> &Histogram {
        &self.pairs[category.index()]
    }

    pub fn iter_pairs(&self) -> impl Iterator<Item = (PairCategory, &Histogram)> {
        PairCategory::ALL
            .iter()
            .map(move |&category| (category, &self.pairs[category.index()]))
    }

    pub fn total(&self) -> u64 {
        self.reference.total()
    }

    pub fn merge(&mut self, other: &DistanceHistograms) {
        self.reference.merge(&other.reference);
        for (mine, theirs) in self.pairs.iter_mut().zip(other.pairs.iter()) {
            mine.merge(theirs);
        }
    }
}

impl Default for DistanceHistograms {
    fn default() -> Self {
        Self::new(0)
    }
}

impl AddAssign<&DistanceHistograms> for DistanceHistograms {
    fn add_assign(&mut self, rhs: &DistanceHistograms) {
        self.merge(rhs);
    }
}

impl Add for DistanceHistograms {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.merge(&rhs);
        self
    }
}

impl Sum for DistanceHistograms {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, h| acc + h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::nucleotide::Nucleotide;

    fn pair(first: Nucleotide, second: Nucleotide, distance: f64) -> PairDistance {
        PairDistance {
            first,
            second,
            distance,
        }
    }

    fn params() -> ModelParameters {
        ModelParameters {
            max_distance: 20.0,
            position_skip: 1,
            bin_width: 1.0,
            ..ModelParameters::default()
        }
    }

    fn category(label: &str) -> PairCategory {
        label.parse().unwrap()
    }

    #[test]
    fn accumulate_matches_three_residue_scenario() {
        let distances = vec![
            pair(Nucleotide::A, Nucleotide::U, 5.0),
            pair(Nucleotide::A, Nucleotide::G, 10.0),
            pair(Nucleotide::U, Nucleotide::G, 5.0),
        ];
        let h = DistanceHistograms::accumulate(distances, &params());

        assert_eq!(h.reference().num_bins(), 20);
        assert_eq!(h.reference().counts()[5], 2);
        assert_eq!(h.reference().counts()[10], 1);
        assert_eq!(h.reference().total(), 3);

        assert_eq!(h.pair(category("AU")).counts()[5], 1);
        assert_eq!(h.pair(category("AG")).counts()[10], 1);
        assert_eq!(h.pair(category("GU")).counts()[5], 1);
        assert_eq!(h.pair(category("AA")).total(), 0);
    }

    #[test]
    fn reference_total_equals_sum_of_category_totals() {
        let distances: Vec<_> = (0..50)
            .map(|k| {
                let a = Nucleotide::ALL[k % 4];
                let b = Nucleotide::ALL[(k / 4) % 4];
                pair(a, b, (k as f64 * 0.37) % 20.0)
            })
            .collect();
        let h = DistanceHistograms::accumulate(distances, &params());
        let category_sum: u64 = h.iter_pairs().map(|(_, hist)| hist.total()).sum();
        assert_eq!(h.reference().total(), category_sum);
        assert_eq!(h.total(), 50);
    }

    #[test]
    fn overflowing_distance_is_folded_into_last_bin() {
        let p = ModelParameters {
            max_distance: 20.0,
            bin_width: 3.0,
            ..ModelParameters::default()
        };
        let h = DistanceHistograms::accumulate([pair(Nucleotide::C, Nucleotide::C, 19.5)], &p);
        assert_eq!(h.reference().num_bins(), 7);
        assert_eq!(h.reference().counts()[6], 1);
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let p = params();
        let a = DistanceHistograms::accumulate([pair(Nucleotide::A, Nucleotide::U, 3.2)], &p);
        let b = DistanceHistograms::accumulate([pair(Nucleotide::G, Nucleotide::C, 7.9)], &p);
        let c = DistanceHistograms::accumulate(
            [
                pair(Nucleotide::U, Nucleotide::A, 3.9),
                pair(Nucleotide::G, Nucleotide::G, 12.0),
            ],
            &p,
        );

        let left = (a.clone() + b.clone()) + c.clone();
        let right = a.clone() + (b.clone() + c.clone());
        let shuffled = c.clone() + a.clone() + b.clone();
        assert_eq!(left, right);
        assert_eq!(left, shuffled);
        assert_eq!(left.pair(category("AU")).counts()[3], 2);
    }

    #[test]
    fn sum_over_partials_equals_single_pass_accumulation() {
        let p = params();
        let all = vec![
            pair(Nucleotide::A, Nucleotide::A, 4.5),
            pair(Nucleotide::C, Nucleotide::U, 8.1),
            pair(Nucleotide::G, Nucleotide::A, 15.0),
            pair(Nucleotide::U, Nucleotide::U, 0.2),
        ];
        let single = DistanceHistograms::accumulate(all.clone(), &p);
        let partials: DistanceHistograms = all
            .chunks(2)
            .map(|chunk| DistanceHistograms::accumulate(chunk.iter().copied(), &p))
            .sum();
        assert_eq!(single, partials);
    }

    #[test]
    fn merging_into_empty_default_adopts_the_other_length() {
        let mut empty = DistanceHistograms::default();
        let filled =
            DistanceHistograms::accumulate([pair(Nucleotide::A, Nucleotide::C, 2.0)], &params());
        empty.merge(&filled);
        assert_eq!(empty, filled);
    }

    #[test]
    fn histogram_merge_extends_shorter_operand() {
        let mut short = Histogram::from_counts(vec![1, 2]);
        short.merge(&Histogram::from_counts(vec![3, 4, 5]));
        assert_eq!(short.counts(), &[4, 6, 5]);
    }
}
