use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{self, geo, set, strings};
use crate::routes;
use crate::state::AppState;

/// Build the application router
///
/// Static segments (`Flush`, `Object`, `Seed`) win over `{key}` captures. Each
/// static route also carries the item verbs it does not claim itself, so a key
/// literally named `Flush`, `Object` or `Seed` stays reachable.
pub fn create_router(state: AppState) -> Result<Router> {
    let origin = state
        .config
        .cors_allowed_origin
        .parse::<HeaderValue>()
        .context("CORS_ALLOWED_ORIGIN must be a valid header value")?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::STRINGS,
            get(strings::list_keys_handler).post(strings::set_value_handler),
        )
        .route(
            routes::STRINGS_FLUSH,
            delete(strings::flush_handler)
                .get(strings::get_value_handler)
                .put(strings::update_value_handler),
        )
        .route(
            routes::STRINGS_OBJECT,
            post(strings::set_object_handler)
                .get(strings::get_value_handler)
                .put(strings::update_value_handler)
                .delete(strings::delete_handler),
        )
        .route(routes::STRINGS_OBJECT_ITEM, get(strings::get_object_handler))
        .route(
            routes::STRINGS_ITEM,
            get(strings::get_value_handler)
                .put(strings::update_value_handler)
                .delete(strings::delete_handler),
        )
        .route(routes::SET, get(set::hello_handler))
        .route(routes::SET_FLUSH, delete(set::flush_handler))
        .route(routes::SET_ITEM, delete(set::delete_handler))
        .route(
            routes::GEO_SEED,
            get(geo::seed_handler).delete(geo::delete_handler),
        )
        .route(routes::GEO_FLUSH, delete(geo::flush_handler))
        .route(routes::GEO_ITEM, delete(geo::delete_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
