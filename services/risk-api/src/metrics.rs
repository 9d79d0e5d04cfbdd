use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use risk_engine::{ScoreResult, ScoringMode};

lazy_static! {
    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        register_metrics(&registry).expect("metrics can be registered");
        registry
    };

    pub static ref PREDICTIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("fraud_predictions_total", "Total scored prediction requests"),
        &["mode"]
    ).expect("metric can be created");

    pub static ref ALERTS_RAISED: IntCounter = IntCounter::new(
        "fraud_alerts_raised_total",
        "Predictions whose probability crossed the alert threshold"
    ).expect("metric can be created");

    pub static ref FRAUD_PROBABILITY: Histogram = Histogram::with_opts(
        HistogramOpts::new("fraud_probability", "Distribution of returned fraud probabilities")
            .buckets(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0])
    ).expect("metric can be created");

    pub static ref REQUEST_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("fraud_api_errors_total", "Error responses by kind"),
        &["kind"]
    ).expect("metric can be created");
}

/// Register all metrics with the given registry
pub fn register_metrics(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(PREDICTIONS_TOTAL.clone()))?;
    registry.register(Box::new(ALERTS_RAISED.clone()))?;
    registry.register(Box::new(FRAUD_PROBABILITY.clone()))?;
    registry.register(Box::new(REQUEST_ERRORS.clone()))?;
    Ok(())
}

pub fn record_prediction(mode: ScoringMode, result: &ScoreResult) {
    PREDICTIONS_TOTAL.with_label_values(&[mode.as_str()]).inc();
    FRAUD_PROBABILITY.observe(result.fraud_probability);
    if result.is_alert {
        ALERTS_RAISED.inc();
    }
}

/// Prometheus text exposition of the service registry
pub fn render() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
