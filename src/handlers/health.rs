use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Health check endpoint
///
/// Pings the store through every namespace handle.
/// Returns 200 OK if all of them answer, 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    for store in state.stores.all() {
        if let Err(e) = store.ping().await {
            tracing::error!("Health check failed for {} namespace: {:#}", store.namespace().name(), e);
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot connect to store: {:#}", e),
                }),
            ));
        }
    }

    tracing::debug!("Health check passed");
    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    ))
}
