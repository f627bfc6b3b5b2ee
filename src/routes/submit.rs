use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{self, SubmitRequest};

/// POST /api/submit — validate the payload and fan out to the notification
/// sinks. Delivery is best-effort: the response reflects validation outcome
/// only, never downstream delivery outcome.
pub async fn submit(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let received_at = Utc::now();

    let req: SubmitRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("Malformed request body: {e}")))?;

    let submission = submission::validate(req, received_at)?;

    tracing::info!(email = %submission.email, "Registration received");

    state.notifiers.fan_out(&submission).await;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Registration successful! We'll be in touch soon.",
        })),
    )
        .into_response())
}

/// OPTIONS /api/submit — CORS preflight. The permissive CORS headers are
/// applied to every response by the layer in `build_app`.
pub async fn preflight() -> Response {
    StatusCode::OK.into_response()
}

/// Any other method on /api/submit.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
