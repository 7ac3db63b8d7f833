//! # Core Module
//!
//! The stateless foundation of RNAPOT: data models, the statistical potential mathematics,
//! and file I/O.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Nucleotides, pair categories and representative atoms
//! - **Statistical Potential** ([`potential`]) - Pair enumeration, histograms, log-odds
//!   derivation, profiles and interpolation
//! - **File I/O** ([`io`]) - Structure readers (PDB, mmCIF), the profile store and the score
//!   table writer
//!
//! ## Scientific Foundation
//!
//! The potential is a knowledge-based (inverse Boltzmann) pseudo-energy. For each pair of
//! nucleotide types the distance distribution observed in known structures is compared with
//! the pooled distribution over all pairs; the negative log of the ratio is the score at that
//! distance. Rarely observed or unobserved combinations are capped at a maximum penalty.

pub mod io;
pub mod models;
pub mod potential;
