//! OpenAPI documentation configuration

use axum_helpers::errors::responses::ServiceUnavailableResponse;
use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog CRUD over PostgreSQL",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::health::ready_handler),
    components(responses(ServiceUnavailableResponse)),
    nest(
        (path = "/api/productos", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Productos", description = "Product catalog endpoints"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
