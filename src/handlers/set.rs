use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::{delete_key, flush_namespace, ItemKey};
use crate::error::{ApiError, ErrorResponse, ProblemDetails};
use crate::routes;
use crate::state::AppState;

/// GET /Set handler - Placeholder greeting
#[utoipa::path(
    get,
    path = routes::SET,
    responses(
        (status = 200, description = "Greeting", body = String)
    ),
    tag = "set"
)]
pub async fn hello_handler() -> (StatusCode, Json<&'static str>) {
    (StatusCode::OK, Json("Hello"))
}

/// DELETE /Set/{key} handler - Remove a key from the sets namespace
#[utoipa::path(
    delete,
    path = routes::SET_ITEM,
    params(
        ("key" = String, Path, description = "Key to remove")
    ),
    responses(
        (status = 204, description = "Successfully removed cached value"),
        (status = 404, description = "Key not found in database", body = ErrorResponse),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "set"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    ItemKey(key): ItemKey,
) -> Result<StatusCode, ApiError> {
    delete_key(
        state.stores.sets.as_ref(),
        &key,
        "Unexpected error removing cached set",
    )
    .await
}

/// DELETE /Set/Flush handler - Clear the sets namespace
#[utoipa::path(
    delete,
    path = routes::SET_FLUSH,
    responses(
        (status = 204, description = "Successfully flushed the database"),
        (status = 500, description = "Server error", body = ProblemDetails)
    ),
    tag = "set"
)]
pub async fn flush_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    flush_namespace(state.stores.sets.as_ref()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{app_with, send};
    use crate::store::memory::{BrokenStore, Fault, MemoryServer};
    use crate::store::{Namespace, NamespaceStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_hello() {
        let app = app_with(MemoryServer::new().handles());

        let response = send(&app, "GET", "/Set", None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!("Hello"));
    }

    #[tokio::test]
    async fn test_delete_present_then_absent() {
        let server = MemoryServer::new();
        let app = app_with(server.handles());
        let sets = server.handle(Namespace::Sets);
        sets.set("members", "a").await.unwrap();

        let deleted = send(&app, "DELETE", "/Set/members", None).await;
        assert_eq!(deleted.status, StatusCode::NO_CONTENT);
        assert!(!sets.exists("members").await.unwrap());

        let again = send(&app, "DELETE", "/Set/members", None).await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
        assert_eq!(again.body["error"], "Key members not found in cache");
    }

    #[tokio::test]
    async fn test_delete_only_looks_in_sets_namespace() {
        let server = MemoryServer::new();
        let app = app_with(server.handles());
        server
            .handle(Namespace::Strings)
            .set("elsewhere", "v")
            .await
            .unwrap();

        let response = send(&app, "DELETE", "/Set/elsewhere", None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_flush() {
        let server = MemoryServer::new();
        let app = app_with(server.handles());
        let sets = server.handle(Namespace::Sets);
        sets.set("a", "1").await.unwrap();
        sets.set("b", "2").await.unwrap();

        let response = send(&app, "DELETE", "/Set/Flush", None).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(sets.keys("*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_problem_details() {
        let app = app_with(BrokenStore::handles(Fault::Unreachable));

        let deleted = send(&app, "DELETE", "/Set/a", None).await;
        assert_eq!(deleted.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            deleted.body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Unexpected error removing cached set")
        );

        let flushed = send(&app, "DELETE", "/Set/Flush", None).await;
        assert_eq!(flushed.status, StatusCode::INTERNAL_SERVER_ERROR);

        // The greeting never touches the store
        let hello = send(&app, "GET", "/Set", None).await;
        assert_eq!(hello.status, StatusCode::OK);
    }
}
