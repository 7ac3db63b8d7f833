//! # RNAPOT Core Library
//!
//! A knowledge-based statistical potential for RNA 3D structures. Distances between the
//! representative atoms of residue pairs in known structures are turned into per-pair-type
//! log-odds profiles, which are then used to score candidate structures: the lower the
//! score, the more the candidate resembles the training corpus.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless value types (nucleotides, pair categories,
//!   atoms), the potential mathematics (pair enumeration, histograms, log-odds derivation,
//!   interpolation) and file I/O (PDB/mmCIF reading, the profile store, score tables).
//!
//! - **[`engine`]: The Logic Core.** Run configuration, corpus discovery, progress reporting
//!   and the per-structure tasks, which merge partial results so they can run in parallel.
//!
//! - **[`workflows`]: The Public API.** `train::run` and `score::run` tie the other layers
//!   together into complete procedures.
//!
//! ## Example
//!
//! ```no_run
//! use rnapot::core::potential::params::ModelParameters;
//! use rnapot::engine::config::TrainConfigBuilder;
//! use rnapot::engine::progress::ProgressReporter;
//! use rnapot::workflows::train;
//!
//! let config = TrainConfigBuilder::new()
//!     .corpus_dir("structures/train".into())
//!     .output_dir("profiles".into())
//!     .parameters(ModelParameters::default())
//!     .build()?;
//! let result = train::run(&config, &ProgressReporter::new())?;
//! println!("trained on {} structures", result.structures);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
