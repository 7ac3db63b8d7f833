//! # Statistical Potential Module
//!
//! The mathematical core of RNAPOT: everything needed to turn residue coordinates into
//! distance statistics, distance statistics into a log-odds potential, and a potential back
//! into a score.
//!
//! - [`params`] - Bin geometry, cutoffs and clamping shared by training and scoring
//! - [`geometry`] - Enumeration of qualifying residue pairs and their distances
//! - [`histogram`] - Per-category and reference distance histograms with associative merging
//! - [`derivation`] - Frequency normalization and the clamped log-odds transform
//! - [`profile`] - Derived per-category potential profiles
//! - [`interpolation`] - Evaluation of a profile at a continuous distance
//!
//! Training and scoring must agree on [`params::ModelParameters`]; the same bin geometry and
//! the same pair-selection rule are used on both sides.

pub mod derivation;
pub mod geometry;
pub mod histogram;
pub mod interpolation;
pub mod params;
pub mod profile;
