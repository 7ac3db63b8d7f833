use super::nucleotide::Nucleotide;
use nalgebra::Point3;

/// The single representative atom of one nucleotide residue.
///
/// Structure readers emit one record per qualifying residue, in file order. Only the chain,
/// the nucleotide type and the position participate in the potential; everything else in the
/// source file is discarded at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Chain identifier, preserved verbatim from the source file.
    pub chain_id: String,
    /// Nucleotide type of the owning residue.
    pub nucleotide: Nucleotide,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

impl AtomRecord {
    pub fn new(chain_id: impl Into<String>, nucleotide: Nucleotide, position: Point3<f64>) -> Self {
        Self {
            chain_id: chain_id.into(),
            nucleotide,
            position,
        }
    }

    #[inline]
    pub fn distance_squared(&self, other: &AtomRecord) -> f64 {
        nalgebra::distance_squared(&self.position, &other.position)
    }
}
