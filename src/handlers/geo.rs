use axum::{extract::State, http::StatusCode};

use super::{delete_key, flush_namespace, ItemKey};
use crate::error::{ApiError, ErrorResponse, ProblemDetails};
use crate::models::{POINTS_OF_INTEREST, POINTS_OF_INTEREST_KEY};
use crate::routes;
use crate::state::AppState;

/// GET /Geo/Seed handler - Add the built-in points of interest
///
/// Each point is added to the `points.of.interest` geospatial set with its
/// label as member name, so seeding again only refreshes the same members.
#[utoipa::path(
    get,
    path = routes::GEO_SEED,
    responses(
        (status = 204, description = "Successfully seeded geo cache"),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "geo"
)]
pub async fn seed_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut added = 0;
    for point in &POINTS_OF_INTEREST {
        point.validate()?;
        let is_new = state
            .stores
            .geo
            .geo_add(
                POINTS_OF_INTEREST_KEY,
                point.longitude,
                point.latitude,
                point.label,
            )
            .await
            .map_err(ApiError::unexpected("Unexpected error seeding geo database"))?;
        if is_new {
            added += 1;
        }
    }

    tracing::info!(
        "Seeded {} points into {} ({} new)",
        POINTS_OF_INTEREST.len(),
        POINTS_OF_INTEREST_KEY,
        added
    );
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /Geo/{key} handler - Remove a key from the geo namespace
///
/// `key` names a top-level key (for example the whole `points.of.interest`
/// set), not a member inside a geospatial set.
#[utoipa::path(
    delete,
    path = routes::GEO_ITEM,
    params(
        ("key" = String, Path, description = "Key to remove")
    ),
    responses(
        (status = 204, description = "Successfully removed cached value"),
        (status = 404, description = "Key not found in database", body = ErrorResponse),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "geo"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    ItemKey(key): ItemKey,
) -> Result<StatusCode, ApiError> {
    delete_key(
        state.stores.geo.as_ref(),
        &key,
        "Unexpected error removing cached Geo set",
    )
    .await
}

/// DELETE /Geo/Flush handler - Clear the geo namespace
#[utoipa::path(
    delete,
    path = routes::GEO_FLUSH,
    responses(
        (status = 204, description = "Successfully flushed the database"),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "geo"
)]
pub async fn flush_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    flush_namespace(state.stores.geo.as_ref()).await
}
