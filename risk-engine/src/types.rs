//! Core types for risk engine

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of positional fields in a feature vector
pub const FEATURE_COUNT: usize = 5;

/// Transaction features, bound by position:
/// `[amount, hour, day, customer_age, account_age]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Transaction value in currency units
    pub amount: f64,

    /// Hour of day (0-23)
    pub hour: f64,

    /// Day of week (0-6, 0 = Monday)
    pub day: f64,

    /// Customer age in years
    pub customer_age: f64,

    /// Days since the account was opened
    pub account_age: f64,
}

impl FeatureVector {
    /// Positional view, in wire order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.amount,
            self.hour,
            self.day,
            self.customer_age,
            self.account_age,
        ]
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        let fields: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            ))
        })?;

        if let Some(position) = fields.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "feature at position {} is not a finite number",
                position
            )));
        }

        let [amount, hour, day, customer_age, account_age] = fields;
        Ok(Self {
            amount,
            hour,
            day,
            customer_age,
            account_age,
        })
    }
}

/// Scoring outcome returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Estimated likelihood of fraud, in [0, 1]
    pub fraud_probability: f64,

    /// Self-reported certainty, in [0, 1]
    pub confidence: f64,

    /// Whether the probability crossed the alert threshold
    pub is_alert: bool,
}

/// How the fraud probability is compared against the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertComparison {
    /// `probability > threshold`
    #[default]
    Exceeds,
    /// `probability >= threshold`
    AtLeast,
}

/// Alert threshold and operator. Deserialization goes through
/// [`AlertPolicy::new`], so the threshold range holds for every instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlertPolicyFields")]
pub struct AlertPolicy {
    /// Threshold in [0, 1]
    pub threshold: f64,

    /// Comparison operator
    pub comparison: AlertComparison,
}

#[derive(Deserialize)]
struct AlertPolicyFields {
    threshold: f64,
    #[serde(default)]
    comparison: AlertComparison,
}

impl TryFrom<AlertPolicyFields> for AlertPolicy {
    type Error = Error;

    fn try_from(fields: AlertPolicyFields) -> Result<Self> {
        AlertPolicy::new(fields.threshold, fields.comparison)
    }
}

impl AlertPolicy {
    /// Default threshold of the deployed service
    pub const DEFAULT_THRESHOLD: f64 = 0.7;

    /// Create a policy, rejecting thresholds outside [0, 1]
    pub fn new(threshold: f64, comparison: AlertComparison) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidConfig(format!(
                "alert threshold {} outside [0, 1]",
                threshold
            )));
        }
        Ok(Self {
            threshold,
            comparison,
        })
    }

    /// Check whether a probability raises an alert
    pub fn is_alert(&self, probability: f64) -> bool {
        match self.comparison {
            AlertComparison::Exceeds => probability > self.threshold,
            AlertComparison::AtLeast => probability >= self.threshold,
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            comparison: AlertComparison::Exceeds,
        }
    }
}

/// Which path produced the probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Hand-written linear heuristic (mock predictions)
    Heuristic,
    /// Trained external classifier
    Classifier,
}

impl ScoringMode {
    /// Metric/log label
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Heuristic => "heuristic",
            ScoringMode::Classifier => "classifier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_binds_by_position() {
        let features = FeatureVector::try_from(&[250.0, 3.0, 6.0, 41.0, 12.0][..]).unwrap();

        assert_eq!(features.amount, 250.0);
        assert_eq!(features.hour, 3.0);
        assert_eq!(features.day, 6.0);
        assert_eq!(features.customer_age, 41.0);
        assert_eq!(features.account_age, 12.0);
        assert_eq!(features.to_array(), [250.0, 3.0, 6.0, 41.0, 12.0]);
    }

    #[test]
    fn test_feature_vector_wrong_length() {
        for len in [0usize, 1, 4, 6] {
            let values = vec![1.0; len];
            let err = FeatureVector::try_from(values.as_slice()).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "len {}", len);
        }
    }

    #[test]
    fn test_feature_vector_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let values = [100.0, 12.0, bad, 30.0, 200.0];
            assert!(FeatureVector::try_from(&values[..]).is_err());
        }
    }

    #[test]
    fn test_alert_policy_boundary() {
        let exceeds = AlertPolicy::new(0.7, AlertComparison::Exceeds).unwrap();
        assert!(!exceeds.is_alert(0.7));
        assert!(exceeds.is_alert(0.700_001));

        let at_least = AlertPolicy::new(0.7, AlertComparison::AtLeast).unwrap();
        assert!(at_least.is_alert(0.7));
        assert!(!at_least.is_alert(0.699_999));
    }

    #[test]
    fn test_alert_policy_rejects_out_of_range_threshold() {
        assert!(AlertPolicy::new(1.5, AlertComparison::Exceeds).is_err());
        assert!(AlertPolicy::new(-0.1, AlertComparison::AtLeast).is_err());
        assert!(AlertPolicy::new(f64::NAN, AlertComparison::Exceeds).is_err());
    }

    #[test]
    fn test_score_result_wire_names() {
        let result = ScoreResult {
            fraud_probability: 0.25,
            confidence: 0.9,
            is_alert: false,
        };
        let json = serde_json::to_value(result).unwrap();

        assert_eq!(json["fraudProbability"], 0.25);
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["isAlert"], false);
    }

    #[test]
    fn test_alert_comparison_config_names() {
        let parsed: AlertComparison = serde_json::from_str("\"at_least\"").unwrap();
        assert_eq!(parsed, AlertComparison::AtLeast);
    }

    #[test]
    fn test_alert_policy_deserialization_checks_threshold() {
        let policy: AlertPolicy = serde_json::from_str(r#"{"threshold": 0.5}"#).unwrap();
        assert_eq!(policy.threshold, 0.5);
        assert_eq!(policy.comparison, AlertComparison::Exceeds);

        let policy: AlertPolicy =
            serde_json::from_str(r#"{"threshold": 1.0, "comparison": "at_least"}"#).unwrap();
        assert!(policy.is_alert(1.0));

        for raw in [r#"{"threshold": 1.5}"#, r#"{"threshold": -0.1}"#] {
            assert!(serde_json::from_str::<AlertPolicy>(raw).is_err(), "{}", raw);
        }
    }
}
