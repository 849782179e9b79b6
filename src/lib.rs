//! # find-models
//!
//! Resolve local model file names (checkpoints, LoRAs, ...) against listings on
//! model-hosting sites. The core is a pure, stateless matching engine:
//!
//! - [`normalize_name`] turns any naming convention into lower-case words.
//! - [`name_similarity`] scores two raw names in `[0.0, 1.0]`.
//!
//! Match decisions (thresholds, picking among search results) live in
//! [`core::matching`] and stay separate from the score itself.

pub mod core;

pub use crate::core::normalize::normalize_name;
pub use crate::core::similarity::{name_similarity, name_similarity_opt};
