use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, ProblemDetails, UnhealthyResponse};
use crate::handlers;
use crate::models::{SetStringObjectRequest, SetStringRequest};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Redis Features API",
        version = "1.0.0",
        description = "Taking a test drive of the various Redis datatypes"
    ),
    paths(
        handlers::health::health_handler,
        handlers::strings::list_keys_handler,
        handlers::strings::get_value_handler,
        handlers::strings::set_value_handler,
        handlers::strings::update_value_handler,
        handlers::strings::delete_handler,
        handlers::strings::flush_handler,
        handlers::strings::set_object_handler,
        handlers::strings::get_object_handler,
        handlers::set::hello_handler,
        handlers::set::delete_handler,
        handlers::set::flush_handler,
        handlers::geo::seed_handler,
        handlers::geo::delete_handler,
        handlers::geo::flush_handler
    ),
    components(
        schemas(
            SetStringRequest,
            SetStringObjectRequest,
            ErrorResponse,
            ProblemDetails,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "strings", description = "String values in Redis database 1"),
        (name = "set", description = "Set keys in Redis database 4"),
        (name = "geo", description = "Geospatial data in Redis database 5")
    )
)]
pub struct ApiDoc;
