//! # Workflows Module
//!
//! The public entry points of RNAPOT. Each workflow takes an immutable configuration value
//! from [`crate::engine::config`] and a [`crate::engine::progress::ProgressReporter`], and
//! runs a complete procedure from input directories to results on disk.
//!
//! - **Training** ([`train`]) - Derive one potential profile per pair category from a corpus
//!   of known structures and save them with a manifest of the parameters used
//! - **Scoring** ([`score`]) - Load trained profiles and score every structure in a
//!   directory, optionally writing a CSV table
//!
//! Both workflows check their input directories before doing any work.

pub mod score;
pub mod train;
