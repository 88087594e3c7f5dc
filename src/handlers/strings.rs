use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde_json::{Map, Value as JsonValue};

use super::{delete_key, flush_namespace, ItemKey};
use crate::error::{ApiError, ErrorResponse, ProblemDetails};
use crate::models::{SetStringObjectRequest, SetStringRequest, SetValueQuery};
use crate::routes;
use crate::state::AppState;

/// GET /Strings handler - List keys in the strings namespace
#[utoipa::path(
    get,
    path = routes::STRINGS,
    responses(
        (status = 200, description = "Array of keys", body = Vec<String>),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn list_keys_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<String>>), ApiError> {
    let keys = state
        .stores
        .strings
        .keys("*")
        .await
        .map_err(ApiError::unexpected("Unexpected error retrieving keys"))?;

    tracing::info!("Listed {} string keys", keys.len());
    Ok((StatusCode::OK, Json(keys)))
}

/// GET /Strings/{key} handler - Retrieve the string cached at a key
///
/// An object stored through `POST /Strings/Object` comes back as its
/// serialized JSON text. Empty values are reported as not found.
#[utoipa::path(
    get,
    path = routes::STRINGS_ITEM,
    params(
        ("key" = String, Path, description = "Key the value is cached at")
    ),
    responses(
        (status = 200, description = "String value cached at the key", body = String),
        (status = 404, description = "Key not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn get_value_handler(
    State(state): State<AppState>,
    ItemKey(key): ItemKey,
) -> Result<(StatusCode, Json<String>), ApiError> {
    let value = state
        .stores
        .strings
        .get(&key)
        .await
        .map_err(ApiError::unexpected("Unexpected error retrieving key"))?;

    match value {
        Some(value) if !value.is_empty() => {
            tracing::info!("Retrieved string value at key: {}", key);
            Ok((StatusCode::OK, Json(value)))
        }
        _ => {
            tracing::info!("String value not found at key: {}", key);
            Err(ApiError::not_found(&key))
        }
    }
}

/// POST /Strings handler - Cache (or replace) a string value
#[utoipa::path(
    post,
    path = routes::STRINGS,
    request_body = SetStringRequest,
    responses(
        (status = 201, description = "Successfully cached value", body = String),
        (status = 400, description = "Invalid request or value not cached", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn set_value_handler(
    State(state): State<AppState>,
    payload: Result<Json<SetStringRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<String>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let stored = state
        .stores
        .strings
        .set(&request.key, &request.value)
        .await
        .map_err(ApiError::unexpected("Unexpected error caching string value"))?;
    if !stored {
        return Err(ApiError::WriteFailed(format!(
            "There was an error adding {} to the cache",
            request.key
        )));
    }

    tracing::info!("Cached string value at key: {}", request.key);
    Ok((
        StatusCode::CREATED,
        location(&routes::strings_item(&request.key)),
        Json(request.value),
    ))
}

/// PUT /Strings/{key}?value= handler - Update a string value
///
/// Same storage effect as `POST /Strings` but answers 202 Accepted.
#[utoipa::path(
    put,
    path = routes::STRINGS_ITEM,
    params(
        ("key" = String, Path, description = "Key to store the value at"),
        SetValueQuery
    ),
    responses(
        (status = 202, description = "Successfully updated cached value", body = String),
        (status = 400, description = "Missing value or value not cached", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn update_value_handler(
    State(state): State<AppState>,
    ItemKey(key): ItemKey,
    query: Result<Query<SetValueQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<String>), ApiError> {
    let Query(query) = query?;
    let value = query.into_value()?;

    let stored = state
        .stores
        .strings
        .set(&key, &value)
        .await
        .map_err(ApiError::unexpected("Unexpected error updating cached string value"))?;
    if !stored {
        return Err(ApiError::WriteFailed(format!(
            "There was an error updating {} to {} in the cache",
            key, value
        )));
    }

    tracing::info!("Updated string value at key: {}", key);
    Ok((StatusCode::ACCEPTED, Json(value)))
}

/// DELETE /Strings/{key} handler - Remove a string or object value
#[utoipa::path(
    delete,
    path = routes::STRINGS_ITEM,
    params(
        ("key" = String, Path, description = "Key to remove")
    ),
    responses(
        (status = 204, description = "Successfully removed cached value"),
        (status = 404, description = "Key not found in database", body = ErrorResponse),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    ItemKey(key): ItemKey,
) -> Result<StatusCode, ApiError> {
    delete_key(
        state.stores.strings.as_ref(),
        &key,
        "Unexpected error removing cached string value",
    )
    .await
}

/// DELETE /Strings/Flush handler - Clear the strings namespace
#[utoipa::path(
    delete,
    path = routes::STRINGS_FLUSH,
    responses(
        (status = 204, description = "Successfully flushed the database"),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn flush_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    flush_namespace(state.stores.strings.as_ref()).await
}

/// POST /Strings/Object handler - Cache an object serialized as JSON text
#[utoipa::path(
    post,
    path = routes::STRINGS_OBJECT,
    request_body = SetStringObjectRequest,
    responses(
        (status = 201, description = "Successfully cached value", body = serde_json::Value),
        (status = 400, description = "Invalid request or value not cached", body = ErrorResponse),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn set_object_handler(
    State(state): State<AppState>,
    payload: Result<Json<SetStringObjectRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<Map<String, JsonValue>>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let serialized = serde_json::to_string(&request.value)
        .map_err(ApiError::unexpected("Unexpected error caching object value"))?;

    let stored = state
        .stores
        .strings
        .set(&request.key, &serialized)
        .await
        .map_err(ApiError::unexpected("Unexpected error caching object value"))?;
    if !stored {
        return Err(ApiError::WriteFailed(format!(
            "There was an error serializing and adding {} to the cache",
            request.key
        )));
    }

    tracing::info!("Cached object value at key: {}", request.key);
    Ok((
        StatusCode::CREATED,
        location(&routes::strings_object_item(&request.key)),
        Json(request.value),
    ))
}

/// GET /Strings/Object/{key} handler - Retrieve a cached object
///
/// A value that is not a serialized JSON object cannot be deserialized and
/// yields a server error.
#[utoipa::path(
    get,
    path = routes::STRINGS_OBJECT_ITEM,
    params(
        ("key" = String, Path, description = "Key the object is cached at")
    ),
    responses(
        (status = 200, description = "Deserialized object cached at the key", body = serde_json::Value),
        (status = 404, description = "Key not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "strings"
)]
pub async fn get_object_handler(
    State(state): State<AppState>,
    ItemKey(key): ItemKey,
) -> Result<(StatusCode, Json<Map<String, JsonValue>>), ApiError> {
    let value = state
        .stores
        .strings
        .get(&key)
        .await
        .map_err(ApiError::unexpected("Unexpected error retrieving key"))?;

    let Some(serialized) = value.filter(|v| !v.is_empty()) else {
        tracing::info!("Object not found at key: {}", key);
        return Err(ApiError::not_found(&key));
    };

    let object: Map<String, JsonValue> = serde_json::from_str(&serialized)
        .map_err(ApiError::unexpected("Unexpected error retrieving key"))?;

    tracing::info!("Retrieved object at key: {}", key);
    Ok((StatusCode::OK, Json(object)))
}

fn location(path: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(path) {
        headers.insert(header::LOCATION, value);
    }
    headers
}
