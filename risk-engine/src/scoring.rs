//! Risk scoring engine

use crate::{
    AlertPolicy, Error, ExternalClassifier, FeatureVector, NoiseSource, Result, ScoreResult,
    ScoringMode, ThreadRngNoise,
};
use std::sync::Arc;
use tracing::debug;

const AMOUNT_UNIT: f64 = 1000.0;
const AMOUNT_WEIGHT: f64 = 0.3;
const AMOUNT_CAP: f64 = 0.3;
const NIGHT_RISK: f64 = 0.2;
const WEEKEND_RISK: f64 = 0.1;
const ACCOUNT_AGE_RISK: f64 = 0.15;
const NEW_ACCOUNT_DAYS: f64 = 30.0;
const DORMANT_ACCOUNT_DAYS: f64 = 3000.0;
const SCORE_JITTER: f64 = 0.1;
const BASE_CONFIDENCE: f64 = 0.8;
const CONFIDENCE_JITTER: f64 = 0.15;

enum Backend {
    Heuristic,
    Classifier(Arc<dyn ExternalClassifier>),
}

/// Risk scorer
///
/// Built once at startup and shared read-only between workers.
pub struct RiskScorer {
    backend: Backend,
    policy: AlertPolicy,
    noise: Arc<dyn NoiseSource>,
}

impl RiskScorer {
    /// Heuristic scorer with production noise and the default alert policy
    pub fn new() -> Self {
        Self::heuristic(AlertPolicy::default(), Arc::new(ThreadRngNoise))
    }

    /// Heuristic scorer with explicit policy and noise source
    pub fn heuristic(policy: AlertPolicy, noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            backend: Backend::Heuristic,
            policy,
            noise,
        }
    }

    /// Scorer delegating probabilities to a trained classifier
    pub fn with_classifier(classifier: Arc<dyn ExternalClassifier>, policy: AlertPolicy) -> Self {
        Self {
            backend: Backend::Classifier(classifier),
            policy,
            noise: Arc::new(ThreadRngNoise),
        }
    }

    /// Active scoring path
    pub fn mode(&self) -> ScoringMode {
        match self.backend {
            Backend::Heuristic => ScoringMode::Heuristic,
            Backend::Classifier(_) => ScoringMode::Classifier,
        }
    }

    /// Alert policy in effect
    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// Score a raw feature vector
    pub fn score(&self, features: &[f64]) -> Result<ScoreResult> {
        let features = FeatureVector::try_from(features)?;
        self.score_features(&features)
    }

    /// Score an already validated feature vector
    pub fn score_features(&self, features: &FeatureVector) -> Result<ScoreResult> {
        let (fraud_probability, confidence) = match &self.backend {
            Backend::Heuristic => self.heuristic_score(features),
            Backend::Classifier(classifier) => classifier_score(classifier.as_ref(), features)?,
        };

        debug!(
            mode = self.mode().as_str(),
            fraud_probability, confidence, "Features scored"
        );

        Ok(ScoreResult {
            fraud_probability,
            confidence,
            is_alert: self.policy.is_alert(fraud_probability),
        })
    }

    fn heuristic_score(&self, features: &FeatureVector) -> (f64, f64) {
        let risk = base_risk(features) + self.noise.uniform(-SCORE_JITTER, SCORE_JITTER);
        let probability = risk.clamp(0.0, 1.0);
        let confidence = BASE_CONFIDENCE + self.noise.uniform(0.0, CONFIDENCE_JITTER);

        (probability, confidence)
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic part of the heuristic, before jitter and clamping
pub fn base_risk(features: &FeatureVector) -> f64 {
    let mut risk = 0.0;

    risk += (features.amount / AMOUNT_UNIT * AMOUNT_WEIGHT).min(AMOUNT_CAP);

    if features.hour >= 22.0 || features.hour <= 6.0 {
        risk += NIGHT_RISK;
    }

    if features.day >= 5.0 {
        risk += WEEKEND_RISK;
    }

    if features.account_age < NEW_ACCOUNT_DAYS || features.account_age > DORMANT_ACCOUNT_DAYS {
        risk += ACCOUNT_AGE_RISK;
    }

    risk
}

fn classifier_score(
    classifier: &dyn ExternalClassifier,
    features: &FeatureVector,
) -> Result<(f64, f64)> {
    let probability = classifier.predict_probability(features)?;

    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(Error::Classifier(format!(
            "{} returned probability {} outside [0, 1]",
            classifier.name(),
            probability
        )));
    }

    Ok((probability, (probability - 0.5).abs() * 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlertComparison, FixedNoise};
    use proptest::prelude::*;

    struct ConstantClassifier(f64);

    impl ExternalClassifier for ConstantClassifier {
        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    struct FailingClassifier;

    impl ExternalClassifier for FailingClassifier {
        fn predict_probability(&self, _features: &FeatureVector) -> Result<f64> {
            Err(Error::Classifier("model unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn quiet_scorer(policy: AlertPolicy) -> RiskScorer {
        RiskScorer::heuristic(policy, Arc::new(FixedNoise::zero()))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_all_risk_factors() {
        let scorer = quiet_scorer(AlertPolicy::default());
        let result = scorer.score(&[1000.0, 23.0, 6.0, 25.0, 10.0]).unwrap();

        assert_close(result.fraud_probability, 0.75);
        assert_close(result.confidence, 0.8);
        assert!(result.is_alert);
    }

    #[test]
    fn test_no_risk_factors() {
        let scorer = quiet_scorer(AlertPolicy::default());
        let result = scorer.score(&[0.0, 12.0, 2.0, 30.0, 500.0]).unwrap();

        assert_eq!(result.fraud_probability, 0.0);
        assert!(!result.is_alert);
    }

    #[test]
    fn test_amount_contribution_is_capped() {
        let small = FeatureVector::try_from(&[500.0, 12.0, 2.0, 30.0, 500.0][..]).unwrap();
        let huge = FeatureVector::try_from(&[1_000_000.0, 12.0, 2.0, 30.0, 500.0][..]).unwrap();

        assert_close(base_risk(&small), 0.15);
        assert_close(base_risk(&huge), 0.3);
    }

    #[test]
    fn test_night_window_edges() {
        for hour in [0.0, 6.0, 22.0, 23.0] {
            let f = FeatureVector::try_from(&[0.0, hour, 0.0, 30.0, 100.0][..]).unwrap();
            assert_close(base_risk(&f), 0.2);
        }
        for hour in [7.0, 12.0, 21.0] {
            let f = FeatureVector::try_from(&[0.0, hour, 0.0, 30.0, 100.0][..]).unwrap();
            assert_close(base_risk(&f), 0.0);
        }
    }

    #[test]
    fn test_account_age_edges() {
        for (age, expected) in [(29.0, 0.15), (30.0, 0.0), (3000.0, 0.0), (3001.0, 0.15)] {
            let f = FeatureVector::try_from(&[0.0, 12.0, 0.0, 30.0, age][..]).unwrap();
            assert_close(base_risk(&f), expected);
        }
    }

    #[test]
    fn test_negative_amount_is_clamped() {
        let scorer = quiet_scorer(AlertPolicy::default());
        let result = scorer.score(&[-5000.0, 12.0, 2.0, 30.0, 500.0]).unwrap();

        assert_eq!(result.fraud_probability, 0.0);
    }

    #[test]
    fn test_noise_is_clamped_to_unit_interval() {
        let high = RiskScorer::heuristic(AlertPolicy::default(), Arc::new(FixedNoise(1.0)));
        let result = high.score(&[1000.0, 23.0, 6.0, 25.0, 10.0]).unwrap();
        assert_close(result.fraud_probability, 0.85);
        assert_close(result.confidence, 0.95);

        let low = RiskScorer::heuristic(AlertPolicy::default(), Arc::new(FixedNoise(-1.0)));
        let result = low.score(&[0.0, 12.0, 2.0, 30.0, 500.0]).unwrap();
        assert_eq!(result.fraud_probability, 0.0);
        assert_close(result.confidence, 0.8);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let scorer = RiskScorer::new();
        for len in [0usize, 1, 4, 6] {
            let features = vec![1.0; len];
            assert!(matches!(
                scorer.score(&features),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        let scorer = RiskScorer::new();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                scorer.score(&[bad, 12.0, 2.0, 30.0, 500.0]),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_threshold_boundary_both_operators() {
        // 0.3 (amount) + 0.2 (night) = 0.5 exactly
        let features = [1000.0, 23.0, 2.0, 30.0, 500.0];

        let exceeds = quiet_scorer(AlertPolicy::new(0.5, AlertComparison::Exceeds).unwrap());
        let at_least = quiet_scorer(AlertPolicy::new(0.5, AlertComparison::AtLeast).unwrap());

        let a = exceeds.score(&features).unwrap();
        let b = at_least.score(&features).unwrap();
        assert_eq!(a.fraud_probability, 0.5);
        assert!(!a.is_alert);
        assert!(b.is_alert);
    }

    #[test]
    fn test_classifier_path() {
        let scorer = RiskScorer::with_classifier(
            Arc::new(ConstantClassifier(0.9)),
            AlertPolicy::default(),
        );
        let result = scorer.score(&[10.0, 12.0, 2.0, 30.0, 500.0]).unwrap();

        assert_eq!(scorer.mode(), ScoringMode::Classifier);
        assert_close(result.fraud_probability, 0.9);
        assert_close(result.confidence, 0.8);
        assert!(result.is_alert);

        let uncertain = RiskScorer::with_classifier(
            Arc::new(ConstantClassifier(0.5)),
            AlertPolicy::default(),
        );
        let result = uncertain.score(&[10.0, 12.0, 2.0, 30.0, 500.0]).unwrap();
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_classifier_out_of_range() {
        for bad in [1.2, -0.1, f64::NAN] {
            let scorer = RiskScorer::with_classifier(
                Arc::new(ConstantClassifier(bad)),
                AlertPolicy::default(),
            );
            assert!(matches!(
                scorer.score(&[10.0, 12.0, 2.0, 30.0, 500.0]),
                Err(Error::Classifier(_))
            ));
        }
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let scorer = RiskScorer::with_classifier(Arc::new(FailingClassifier), AlertPolicy::default());
        assert!(scorer.score(&[10.0, 12.0, 2.0, 30.0, 500.0]).is_err());
    }

    #[test]
    fn test_classifier_still_validates_input() {
        let scorer = RiskScorer::with_classifier(
            Arc::new(ConstantClassifier(0.1)),
            AlertPolicy::default(),
        );
        assert!(matches!(scorer.score(&[1.0, 2.0]), Err(Error::InvalidInput(_))));
    }

    proptest! {
        #[test]
        fn prop_outputs_stay_in_unit_interval(
            amount in -1.0e9f64..1.0e9,
            hour in -50.0f64..50.0,
            day in -10.0f64..10.0,
            customer_age in 0.0f64..120.0,
            account_age in -100.0f64..10_000.0,
        ) {
            let scorer = RiskScorer::new();
            let result = scorer.score(&[amount, hour, day, customer_age, account_age]).unwrap();

            prop_assert!((0.0..=1.0).contains(&result.fraud_probability));
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert_eq!(result.is_alert, result.fraud_probability > 0.7);
        }
    }
}
