use crate::auth::AuthError;
use crate::demo_metrics;
use crate::errors::{ApiError, ApiResult};
use crate::metrics;
use crate::middleware::JwtAuth;
use crate::models::*;
use crate::state::AppState;
use actix_web::{middleware::Condition, web, HttpResponse};
use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

// ===== Index =====
pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ServiceIndex {
        status: "online".to_string(),
        message: "Fraud Detection API is running".to_string(),
        endpoints: EndpointIndex {
            health: state.path("/health"),
            metrics: state.path("/metrics"),
            predict: state.path("/predict"),
            auth: AuthEndpoints {
                login: state.path("/auth/login"),
                register: state.path("/auth/register"),
            },
        },
    })
}

// ===== Health Check =====
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        using_mock_predictions: state.using_mock_predictions(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

// ===== Predict =====
pub async fn predict(
    req: web::Json<PredictRequest>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let features = req.into_inner().features;

    let result = state.scorer.score(&features)?;

    metrics::record_prediction(state.scorer.mode(), &result);

    info!(
        features = ?features,
        "Prediction request - Probability: {:.4}",
        result.fraud_probability
    );

    Ok(HttpResponse::Ok().json(result))
}

// ===== Dashboard Metrics =====
pub async fn dashboard_metrics() -> HttpResponse {
    HttpResponse::Ok().json(demo_metrics::generate(&mut rand::thread_rng()))
}

// ===== Prometheus =====
pub async fn prometheus_metrics() -> ApiResult<HttpResponse> {
    let body = metrics::render().map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}

// ===== Auth =====
pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();
    if req.validate().is_err() {
        return Err(AuthError::MissingCredentials.into());
    }
    let (email, password) = match (req.email, req.password) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(AuthError::MissingCredentials.into()),
    };

    let (token, claims) = state.authenticator.login(&email, &password)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserInfo {
            email: claims.email,
            role: claims.role,
        },
    }))
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();
    if let Err(e) = req.validate() {
        warn!("Registration rejected: {}", e);
        return Err(AuthError::MissingFields.into());
    }
    let (email, password) = match (req.email, req.password) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(AuthError::MissingFields.into()),
    };

    state.authenticator.register(&email, &password)?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}

/// Body extraction failures answer with the 400 contract
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into())
}

// ===== Configure Routes =====
/// Bearer-token guard for the scoring and dashboard routes, active only when
/// auth is enabled
fn token_guard(state: &AppState) -> Condition<JwtAuth> {
    Condition::new(state.auth_enabled, JwtAuth::new(state.authenticator.clone()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &web::Data<AppState>) {
    let mut scope = web::scope(&state.route_prefix)
        .route("/", web::get().to(home))
        .route("/health", web::get().to(health_check))
        .route("/metrics/prometheus", web::get().to(prometheus_metrics))
        .route("/auth/login", web::post().to(login))
        .route("/auth/register", web::post().to(register))
        .service(
            web::resource("/predict")
                .wrap(token_guard(state))
                .route(web::post().to(predict)),
        )
        .service(
            web::resource("/metrics")
                .wrap(token_guard(state))
                .route(web::get().to(dashboard_metrics)),
        );

    // `/api` as well as `/api/`
    if !state.route_prefix.is_empty() {
        scope = scope.route("", web::get().to(home));
    }

    cfg.app_data(state.clone()).app_data(json_config()).service(scope);
}
