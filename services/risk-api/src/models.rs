use crate::auth::Role;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ===== Prediction =====
#[derive(Debug, Deserialize, Clone)]
pub struct PredictRequest {
    /// `[amount, hour, day, customerAge, accountAge]`
    pub features: Vec<f64>,
}

// ===== Health / Index =====
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub using_mock_predictions: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceIndex {
    pub status: String,
    pub message: String,
    pub endpoints: EndpointIndex,
}

#[derive(Debug, Serialize)]
pub struct EndpointIndex {
    pub health: String,
    pub metrics: String,
    pub predict: String,
    pub auth: AuthEndpoints,
}

#[derive(Debug, Serialize)]
pub struct AuthEndpoints {
    pub login: String,
    pub register: String,
}

// ===== Dashboard Metrics =====
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_transactions: u32,
    pub fraud_rate: f64, // percent
    pub avg_transaction_value: f64,
    pub fraud_by_hour: Vec<HourlyFraud>,
    pub fraud_heatmap: Vec<HeatmapRow>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyFraud {
    pub hour: u8,
    pub fraud_count: u32,
}

/// One heatmap series, id `"{Day}-{hour}"`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HeatmapRow {
    pub id: String,
    pub data: Vec<HeatmapCell>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HeatmapCell {
    pub x: String,
    pub y: String,
    pub value: u32,
}

// ===== Auth =====
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
