//! Trained classifier capability
//!
//! The scorer can delegate to a binary classifier instead of the heuristic.
//! No trained backend ships with this crate; deployments plug one in at
//! startup through this trait.

use crate::{FeatureVector, Result};

/// Binary fraud classifier returning the positive-class probability
pub trait ExternalClassifier: Send + Sync {
    /// Probability in [0, 1] that the transaction is fraudulent
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64>;

    /// Model identifier for logs and health output
    fn name(&self) -> &str;
}
