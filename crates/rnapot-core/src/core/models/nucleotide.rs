use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four canonical RNA nucleotides.
///
/// Variants are declared in lexicographic order of their one-letter symbols, so the derived
/// `Ord` matches sorting the symbols as text. Pair canonicalization relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    A,
    C,
    G,
    U,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid nucleotide symbol: '{0}'. Expected one of A, U, G, C.")]
pub struct NucleotideParseError(pub String);

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::U];

    pub fn symbol(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::U => 'U',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'U' => Some(Nucleotide::U),
            _ => None,
        }
    }
}

impl FromStr for Nucleotide {
    type Err = NucleotideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c).ok_or_else(|| NucleotideParseError(s.into())),
            _ => Err(NucleotideParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
