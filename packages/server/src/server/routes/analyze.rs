//! Name-pair analysis endpoint.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::middleware::ClientIp;
use glm_client::GlmError;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub name1: String,
    pub name2: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub similarity: i64,
    pub evaluation: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Upstream failures mapped to user-facing responses.
///
/// Unparsable model *content* never reaches here; the analyzer substitutes
/// a fallback verdict for it. Only failed upstream calls surface as errors,
/// with distinct messages for rate limiting and exhausted balance.
pub struct ApiError(GlmError);

impl From<GlmError> for ApiError {
    fn from(err: GlmError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "upstream analysis call failed");

        let (status, message) = match self.0 {
            GlmError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "请求过于频繁，请稍后再试"),
            GlmError::InsufficientBalance => {
                (StatusCode::PAYMENT_REQUIRED, "余额不足，请充值后再试")
            }
            _ => (StatusCode::BAD_GATEWAY, "分析过程中出现错误，请稍后再试"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Analyze the affinity of two names.
///
/// Always answers with a score/commentary pair when the upstream call
/// succeeds, genuine or fallback; answers an error only for a failed call.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let ip = client_ip
        .map(|Extension(ClientIp(ip))| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let verdict = state
        .analyzer
        .analyze(&payload.name1, &payload.name2, &ip)
        .await?;

    Ok(Json(AnalyzeResponse {
        similarity: verdict.score,
        evaluation: verdict.commentary,
        timestamp: verdict.produced_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }))
}
