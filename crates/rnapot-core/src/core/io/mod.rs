//! Provides input/output for structure files, trained profiles and score tables.
//!
//! Structure readers share the [`traits::StructureFile`] interface and reduce each file to
//! the representative atoms of its canonical nucleotide residues. Trained profiles are
//! persisted per pair category by [`profile::ProfileStore`], and scoring results are
//! written as CSV by [`scores`].

pub mod profile;
pub mod scores;
pub mod structure;
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;
