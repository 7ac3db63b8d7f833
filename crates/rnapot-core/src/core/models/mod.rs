//! # Core Models Module
//!
//! The small set of value types the potential operates on.
//!
//! ## Key Components
//!
//! - [`nucleotide`] - The four canonical RNA nucleotides
//! - [`pair`] - Canonical unordered nucleotide pairs (ten categories) used to index
//!   histograms and profiles
//! - [`atom`] - The representative atom of one residue: chain, nucleotide, position
//!
//! ## Usage
//!
//! ```ignore
//! use rnapot::core::models::{atom::AtomRecord, nucleotide::Nucleotide, pair::PairCategory};
//!
//! let atom = AtomRecord::new("A", Nucleotide::G, Point3::new(1.0, 2.0, 3.0));
//! let category = PairCategory::classify(Nucleotide::U, Nucleotide::G);
//! assert_eq!(category.label(), "GU");
//! ```

pub mod atom;
pub mod nucleotide;
pub mod pair;
