use crate::auth::{Authenticator, UserStore};
use crate::config::{Config, ScoringConfig, DEFAULT_JWT_SECRET};
use risk_engine::{
    ExternalClassifier, NoiseSource, RiskScorer, ScoringMode, SeededNoise, ThreadRngNoise,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the handlers need, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<RiskScorer>,
    pub authenticator: Arc<Authenticator>,
    pub auth_enabled: bool,
    pub route_prefix: String,
}

impl AppState {
    /// `classifier` is the trained backend, if the deployment provides one
    pub fn from_config(
        config: &Config,
        classifier: Option<Arc<dyn ExternalClassifier>>,
    ) -> risk_engine::Result<Self> {
        let scorer = build_scorer(&config.scoring, classifier)?;

        let store = if config.auth.seed_demo_users {
            UserStore::with_demo_accounts()
        } else {
            UserStore::new()
        };

        if config.auth.enabled && config.auth.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Authentication enabled with the default JWT secret");
        }

        let authenticator = Authenticator::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_hours,
            store,
        );

        Ok(Self {
            scorer: Arc::new(scorer),
            authenticator: Arc::new(authenticator),
            auth_enabled: config.auth.enabled,
            route_prefix: config.server.route_prefix.clone(),
        })
    }

    pub fn using_mock_predictions(&self) -> bool {
        self.scorer.mode() == ScoringMode::Heuristic
    }

    /// Public path of a route, including the configured prefix
    pub fn path(&self, route: &str) -> String {
        format!("{}{}", self.route_prefix, route)
    }
}

/// Pick the scoring path once; a missing classifier falls back to the heuristic
pub fn build_scorer(
    scoring: &ScoringConfig,
    classifier: Option<Arc<dyn ExternalClassifier>>,
) -> risk_engine::Result<RiskScorer> {
    let policy = scoring.alert_policy()?;

    match (scoring.use_mock_predictions, classifier) {
        (false, Some(classifier)) => {
            info!(model = classifier.name(), "Using trained classifier for predictions");
            Ok(RiskScorer::with_classifier(classifier, policy))
        }
        (use_mock, _) => {
            if !use_mock {
                warn!("No trained classifier available. Using mock predictions.");
            }
            let noise: Arc<dyn NoiseSource> = match scoring.noise_seed {
                Some(seed) => Arc::new(SeededNoise::new(seed)),
                None => Arc::new(ThreadRngNoise),
            };
            info!(
                threshold = policy.threshold,
                comparison = ?policy.comparison,
                "Using heuristic scorer"
            );
            Ok(RiskScorer::heuristic(policy, noise))
        }
    }
}
