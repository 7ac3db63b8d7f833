use super::nucleotide::Nucleotide;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A canonical, unordered pair of nucleotides.
///
/// The two members are always stored in sorted order, so `AU` and `UA` are the same category.
/// With four nucleotides there are exactly ten categories (combinations with repetition),
/// listed in [`PairCategory::ALL`] in lexicographic order of their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairCategory {
    first: Nucleotide,
    second: Nucleotide,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid pair category label: '{0}'. Expected two nucleotide symbols (e.g., 'AU').")]
pub struct PairCategoryParseError(pub String);

impl PairCategory {
    pub const COUNT: usize = 10;

    pub const ALL: [PairCategory; Self::COUNT] = [
        Self::of(Nucleotide::A, Nucleotide::A),
        Self::of(Nucleotide::A, Nucleotide::C),
        Self::of(Nucleotide::A, Nucleotide::G),
        Self::of(Nucleotide::A, Nucleotide::U),
        Self::of(Nucleotide::C, Nucleotide::C),
        Self::of(Nucleotide::C, Nucleotide::G),
        Self::of(Nucleotide::C, Nucleotide::U),
        Self::of(Nucleotide::G, Nucleotide::G),
        Self::of(Nucleotide::G, Nucleotide::U),
        Self::of(Nucleotide::U, Nucleotide::U),
    ];

    // Callers guarantee `first <= second`.
    const fn of(first: Nucleotide, second: Nucleotide) -> Self {
        Self { first, second }
    }

    /// Canonicalizes two nucleotides into their pair category.
    ///
    /// Commutative: `classify(a, b) == classify(b, a)`.
    pub fn classify(a: Nucleotide, b: Nucleotide) -> Self {
        if a <= b { Self::of(a, b) } else { Self::of(b, a) }
    }

    pub fn members(&self) -> (Nucleotide, Nucleotide) {
        (self.first, self.second)
    }

    /// Position of this category in [`PairCategory::ALL`], usable as a dense array index.
    pub fn index(&self) -> usize {
        let rank = |n: Nucleotide| n as usize;
        let (i, j) = (rank(self.first), rank(self.second));
        // Row offsets of an upper-triangular 4x4 layout: 0, 4, 7, 9.
        let row_offset = i * 4 - (i * i.saturating_sub(1)) / 2;
        row_offset + (j - i)
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.first, self.second)
    }
}

impl FromStr for PairCategory {
    type Err = PairCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        match symbols.as_slice() {
            [a, b] => {
                let a = Nucleotide::from_symbol(*a);
                let b = Nucleotide::from_symbol(*b);
                match (a, b) {
                    (Some(a), Some(b)) => Ok(Self::classify(a, b)),
                    _ => Err(PairCategoryParseError(s.to_string())),
                }
            }
            _ => Err(PairCategoryParseError(s.to_string())),
        }
    }
}

impl fmt::Display for PairCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

impl Serialize for PairCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for PairCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
