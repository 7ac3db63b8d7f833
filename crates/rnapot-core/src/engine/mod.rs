//! # Engine Module
//!
//! The orchestration layer between the stateless [`crate::core`] and the public
//! [`crate::workflows`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Immutable run settings for training and scoring, built
//!   through validating builders
//! - **Corpus Discovery** ([`corpus`]) - Finding structure files in a directory
//! - **Tasks** ([`tasks`]) - Histogram accumulation and structure scoring, parallel over
//!   structures when the `parallel` feature is enabled
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - The engine error type every workflow returns
//!
//! Model parameters travel inside the configuration values; nothing in this layer holds
//! global state, so runs with different parameters can proceed side by side.

pub mod config;
pub mod corpus;
pub mod error;
pub mod progress;
pub mod tasks;
