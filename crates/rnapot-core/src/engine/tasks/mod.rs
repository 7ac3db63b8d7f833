//! Computational tasks over a list of structure files.
//!
//! Each task processes structures independently and combines per-structure results at the
//! end, so the same code runs sequentially or on rayon's pool when the `parallel` feature
//! is enabled.

pub mod accumulation;
pub mod scoring;
