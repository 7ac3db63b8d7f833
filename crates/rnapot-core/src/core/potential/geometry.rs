use super::params::ModelParameters;
use crate::core::models::atom::AtomRecord;
use crate::core::models::nucleotide::Nucleotide;
use crate::core::models::pair::PairCategory;

/// A qualifying residue pair and the distance between their representative atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairDistance {
    pub first: Nucleotide,
    pub second: Nucleotide,
    pub distance: f64,
}

impl PairDistance {
    #[inline]
    pub fn category(&self) -> PairCategory {
        PairCategory::classify(self.first, self.second)
    }
}

/// Enumerates every residue pair `(i, j)` with `j >= i + position_skip`, both residues on the
/// same chain, and a distance strictly below `max_distance`.
///
/// Each unordered structural pair is visited at most once, with `i` before `j` in input order.
/// The cutoff is tested on squared distances; the square root is only taken for pairs that
/// pass.
pub fn residue_distances(atoms: &[AtomRecord], params: &ModelParameters) -> Vec<PairDistance> {
    let mut distances = Vec::new();
    for_each_residue_distance(atoms, params, |pair| distances.push(pair));
    distances
}

/// Visitor form of [`residue_distances`] that avoids materializing the pair list.
pub fn for_each_residue_distance<F>(atoms: &[AtomRecord], params: &ModelParameters, mut visit: F)
where
    F: FnMut(PairDistance),
{
    let skip = params.position_skip;
    let cutoff_sq = params.max_distance_squared();

    for (i, atom_i) in atoms.iter().enumerate() {
        let Some(start) = i.checked_add(skip) else {
            break;
        };
        // A zero skip would otherwise pair every residue with itself.
        let start = start.max(i + 1);
        if start >= atoms.len() {
            break;
        }

        for atom_j in &atoms[start..] {
            if atom_j.chain_id != atom_i.chain_id {
                continue;
            }
            let d2 = atom_i.distance_squared(atom_j);
            if d2 < cutoff_sq {
                visit(PairDistance {
                    first: atom_i.nucleotide,
                    second: atom_j.nucleotide,
                    distance: d2.sqrt(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn atom(chain: &str, nucleotide: Nucleotide, z: f64) -> AtomRecord {
        AtomRecord::new(chain, nucleotide, Point3::new(0.0, 0.0, z))
    }

    fn params(position_skip: usize, max_distance: f64) -> ModelParameters {
        ModelParameters {
            max_distance,
            position_skip,
            ..ModelParameters::default()
        }
    }

    #[test]
    fn empty_atom_list_yields_no_pairs() {
        assert!(residue_distances(&[], &ModelParameters::default()).is_empty());
    }

    #[test]
    fn three_residue_chain_yields_all_forward_pairs() {
        let atoms = vec![
            atom("A", Nucleotide::A, 0.0),
            atom("A", Nucleotide::U, 5.0),
            atom("A", Nucleotide::G, 10.0),
        ];
        let pairs = residue_distances(&atoms, &params(1, 20.0));

        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].first, pairs[0].second), (Nucleotide::A, Nucleotide::U));
        assert!((pairs[0].distance - 5.0).abs() < TOLERANCE);
        assert_eq!((pairs[1].first, pairs[1].second), (Nucleotide::A, Nucleotide::G));
        assert!((pairs[1].distance - 10.0).abs() < TOLERANCE);
        assert_eq!((pairs[2].first, pairs[2].second), (Nucleotide::U, Nucleotide::G));
        assert!((pairs[2].distance - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn position_skip_excludes_close_sequence_neighbors() {
        let atoms: Vec<_> = (0..6).map(|k| atom("A", Nucleotide::C, k as f64)).collect();
        let pairs = residue_distances(&atoms, &params(4, 20.0));
        // Only (0,4), (0,5) and (1,5) are at least four positions apart.
        assert_eq!(pairs.len(), 3);
        let mut distances: Vec<f64> = pairs.iter().map(|p| p.distance).collect();
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(distances, vec![4.0, 4.0, 5.0]);
    }

    #[test]
    fn pairs_across_chains_are_never_emitted() {
        let atoms = vec![
            atom("A", Nucleotide::A, 0.0),
            atom("B", Nucleotide::U, 1.0),
            atom("A", Nucleotide::G, 2.0),
            atom("B", Nucleotide::C, 3.0),
        ];
        let pairs = residue_distances(&atoms, &params(1, 20.0));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].category().label(), "AG");
        assert_eq!(pairs[1].category().label(), "CU");
    }

    #[test]
    fn cutoff_is_exclusive() {
        let atoms = vec![atom("A", Nucleotide::A, 0.0), atom("A", Nucleotide::A, 20.0)];
        assert!(residue_distances(&atoms, &params(1, 20.0)).is_empty());

        let atoms = vec![atom("A", Nucleotide::A, 0.0), atom("A", Nucleotide::A, 19.999)];
        assert_eq!(residue_distances(&atoms, &params(1, 20.0)).len(), 1);
    }

    #[test]
    fn zero_position_skip_does_not_pair_a_residue_with_itself() {
        let atoms = vec![atom("A", Nucleotide::A, 0.0), atom("A", Nucleotide::U, 3.0)];
        let pairs = residue_distances(&atoms, &params(0, 20.0));
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].distance - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn skip_larger_than_structure_yields_no_pairs() {
        let atoms = vec![atom("A", Nucleotide::A, 0.0), atom("A", Nucleotide::U, 3.0)];
        assert!(residue_distances(&atoms, &params(usize::MAX, 20.0)).is_empty());
    }
}
