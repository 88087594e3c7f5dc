pub mod geo;
pub mod health;
pub mod set;
pub mod strings;

pub use health::health_handler;

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use percent_encoding::percent_decode_str;

use crate::error::ApiError;
use crate::store::NamespaceStore;

/// Key addressed by an item route
///
/// Taken from the `{key}` capture when the route has one. Static routes such as
/// `/Strings/Flush` also serve the verbs they do not claim, and there the
/// literal final segment is the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ItemKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(key)) = Path::<String>::from_request_parts(parts, state).await {
            return Ok(ItemKey(key));
        }

        let segment = parts.uri.path().rsplit('/').next().unwrap_or_default();
        let key = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|e| ApiError::Validation(format!("Invalid key in path: {}", e)))?;
        Ok(ItemKey(key.into_owned()))
    }
}

/// Delete `key` from a namespace, refusing when it is absent
///
/// Deletion is not idempotent: a missing key is reported as not found rather
/// than silently succeeding.
async fn delete_key(
    store: &dyn NamespaceStore,
    key: &str,
    context: &'static str,
) -> Result<StatusCode, ApiError> {
    let exists = store.exists(key).await.map_err(ApiError::unexpected(context))?;
    if !exists {
        tracing::info!("Key {} not found in {} namespace", key, store.namespace().name());
        return Err(ApiError::not_found(key));
    }

    store.remove(key).await.map_err(ApiError::unexpected(context))?;

    tracing::info!("Removed key {} from {} namespace", key, store.namespace().name());
    Ok(StatusCode::NO_CONTENT)
}

async fn flush_namespace(store: &dyn NamespaceStore) -> Result<StatusCode, ApiError> {
    store
        .flush()
        .await
        .map_err(ApiError::unexpected("Unexpected error flushing database"))?;

    tracing::info!("Flushed {} namespace", store.namespace().name());
    Ok(StatusCode::NO_CONTENT)
}
