//! Risk Engine for fraud scoring
//!
//! Turns a five-field transaction feature vector into a fraud probability,
//! a confidence value and an alert decision.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod error;
pub mod noise;
pub mod scoring;
pub mod types;

pub use classifier::ExternalClassifier;
pub use error::{Error, Result};
pub use noise::{FixedNoise, NoiseSource, SeededNoise, ThreadRngNoise};
pub use scoring::RiskScorer;
pub use types::*;
