//! HTTP handlers for the productos resource

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestMismatchResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Category, Product, ProductInput, SearchQuery, Supplier};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Where the router is mounted; used for the `Location` header on create
pub const BASE_PATH: &str = "/api/productos";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_all,
        create,
        get_by_id,
        update,
        delete,
        list_sorted_by_price,
        search_by_name,
        list_by_category,
        list_by_supplier,
    ),
    components(
        schemas(Product, ProductInput, Category, Supplier),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestMismatchResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Productos", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Productos router; static segments take precedence over `/{id}`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_all).post(create))
        .route("/ordenar-por-precio", get(list_sorted_by_price))
        .route("/buscar", get(search_by_name))
        .route("/por-categoria/{categoriaId}", get(list_by_category))
        .route("/por-proveedor/{proveedorId}", get(list_by_supplier))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
        .with_state(shared_service)
}

/// List every product with its category and supplier
#[utoipa::path(
    get,
    path = "",
    tag = "Productos",
    responses(
        (status = 200, description = "All products ordered by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_all<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.list_all().await?))
}

/// Create a product; any id in the body is ignored
#[utoipa::path(
    post,
    path = "",
    tag = "Productos",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create(input).await?;
    let location = format!("{}/{}", BASE_PATH, product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Get a product with its category and supplier
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Productos",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_id<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Replace a product; the body id must equal the path id
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Productos",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = ProductInput,
    responses(
        (status = 204, description = "Product replaced, or no product with that id"),
        (status = 400, response = BadRequestMismatchResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<StatusCode> {
    service.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Productos",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List products by ascending price
#[utoipa::path(
    get,
    path = "/ordenar-por-precio",
    tag = "Productos",
    responses(
        (status = 200, description = "Products by ascending price, ties by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_sorted_by_price<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.list_sorted_by_price().await?))
}

/// Search products by name substring
#[utoipa::path(
    get,
    path = "/buscar",
    tag = "Productos",
    params(SearchQuery),
    responses(
        (status = 200, description = "Products whose name contains the fragment", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Query(query) = query?;
    Ok(Json(service.search_by_name(query.nombre.as_deref()).await?))
}

#[utoipa::path(
    get,
    path = "/por-categoria/{categoriaId}",
    tag = "Productos",
    params(
        ("categoriaId" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(category_id): IdPath,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.list_by_category(category_id).await?))
}

#[utoipa::path(
    get,
    path = "/por-proveedor/{proveedorId}",
    tag = "Productos",
    params(
        ("proveedorId" = i32, Path, description = "Supplier id")
    ),
    responses(
        (status = 200, description = "Products from the supplier", body = Vec<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_supplier<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(supplier_id): IdPath,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.list_by_supplier(supplier_id).await?))
}
