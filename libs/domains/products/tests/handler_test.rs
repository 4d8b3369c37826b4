//! Handler tests for the productos domain
//!
//! The router runs against `InMemoryProductRepository` seeded with the same
//! categories and suppliers the migrations insert, so no database is needed.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::dec;
use serde_json::{Value, json};
use test_utils::assertions::assert_sorted_by;
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn repository() -> InMemoryProductRepository {
    InMemoryProductRepository::with_reference_data(
        vec![
            Category {
                id: 1,
                name: "General".into(),
            },
            Category {
                id: 2,
                name: "Perifericos".into(),
            },
        ],
        vec![
            Supplier {
                id: 1,
                name: "Distribuidora Central".into(),
            },
            Supplier {
                id: 2,
                name: "Importadora del Norte".into(),
            },
        ],
    )
}

fn app() -> Router {
    handlers::router(ProductService::new(repository()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, nombre: &str, precio: f64, categoria: i32, proveedor: i32) -> Product {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "nombre": nombre,
                "precio": precio,
                "categoriaId": categoria,
                "proveedorId": proveedor
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

/// Mouse (10.0, cat 1, sup 1) and Keyboard (25.0, cat 1, sup 2), inserted Keyboard first
async fn scenario() -> (Router, Product, Product) {
    let app = app();
    let keyboard = create(&app, "Keyboard", 25.0, 1, 2).await;
    let mouse = create(&app, "Mouse", 10.0, 1, 1).await;
    (app, mouse, keyboard)
}

async fn list(app: &Router, uri: &str) -> Vec<Product> {
    let response = app.clone().oneshot(get(uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn test_create_returns_201_with_location() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "id": 99,
                "nombre": "Mouse",
                "descripcion": "Optical",
                "precio": 10.5,
                "categoriaId": 1,
                "proveedorId": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/productos/1"
    );

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.price, dec!(10.5));
    assert_eq!(product.category.unwrap().name, "General");
}

#[tokio::test]
async fn test_get_after_create_matches_payload() {
    let app = app();
    let created = create(&app, "Monitor", 199.99, 2, 2).await;

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Monitor");
    assert_eq!(fetched.supplier.unwrap().name, "Importadora del Norte");
}

#[tokio::test]
async fn test_create_empty_name_is_400_with_details() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"nombre": "", "precio": 1.0, "categoriaId": 1, "proveedorId": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_unknown_supplier_is_400() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"nombre": "Mouse", "precio": 1.0, "categoriaId": 1, "proveedorId": 9}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let response = app().oneshot(get("/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_integer_id_is_400() {
    let response = app().oneshot(get("/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_update_replaces_and_returns_204() {
    let app = app();
    let created = create(&app, "Mouse", 10.0, 1, 1).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({
                "id": created.id,
                "nombre": "Wireless Mouse",
                "precio": 12.0,
                "categoriaId": 2,
                "proveedorId": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let updated: Product = json_body(
        app.oneshot(get(&format!("/{}", created.id)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(updated.name, "Wireless Mouse");
    assert_eq!(updated.price, dec!(12));
    assert_eq!(updated.category_id, 2);
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn test_update_id_mismatch_is_400_and_leaves_row() {
    let app = app();
    let created = create(&app, "Mouse", 10.0, 1, 1).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({"id": created.id + 1, "nombre": "Other", "precio": 1.0, "categoriaId": 1, "proveedorId": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");

    let unchanged: Product = json_body(
        app.oneshot(get(&format!("/{}", created.id)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(unchanged.name, "Mouse");
}

#[tokio::test]
async fn test_update_missing_row_is_204_noop() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/77",
            json!({"id": 77, "nombre": "Ghost", "precio": 1.0, "categoriaId": 1, "proveedorId": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/77")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_row_with_unknown_supplier_is_204() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/77",
            json!({"id": 77, "nombre": "Ghost", "precio": 1.0, "categoriaId": 1, "proveedorId": 9}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();
    let created = create(&app, "Mouse", 10.0, 1, 1).await;
    let uri = format!("/{}", created.id);

    let delete = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let delete_again = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(delete_again).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_all_ordered_by_id_with_relations() {
    let (app, mouse, keyboard) = scenario().await;

    let all = list(&app, "/").await;

    assert_eq!(
        all.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![keyboard.id, mouse.id]
    );
    assert!(all.iter().all(|p| p.category.is_some() && p.supplier.is_some()));
}

#[tokio::test]
async fn test_sorted_by_price() {
    let (app, _, _) = scenario().await;

    let sorted = list(&app, "/ordenar-por-precio").await;

    assert_eq!(names(&sorted), vec!["Mouse", "Keyboard"]);
    assert_sorted_by(&sorted, |p| p.price, "ordenar-por-precio");
    assert!(sorted.iter().all(|p| p.category.is_none()));
}

#[tokio::test]
async fn test_search_by_name() {
    let (app, _, _) = scenario().await;

    assert_eq!(names(&list(&app, "/buscar?nombre=ous").await), vec!["Mouse"]);
    assert!(list(&app, "/buscar?nombre=OUS").await.is_empty());
}

#[tokio::test]
async fn test_search_empty_or_missing_returns_everything() {
    let (app, _, _) = scenario().await;

    let all: Vec<i32> = list(&app, "/").await.iter().map(|p| p.id).collect();
    let empty: Vec<i32> = list(&app, "/buscar?nombre=").await.iter().map(|p| p.id).collect();
    let missing: Vec<i32> = list(&app, "/buscar").await.iter().map(|p| p.id).collect();

    assert_eq!(empty, all);
    assert_eq!(missing, all);
}

#[tokio::test]
async fn test_by_category_and_supplier() {
    let (app, _, _) = scenario().await;

    assert_eq!(
        names(&list(&app, "/por-categoria/1").await),
        vec!["Keyboard", "Mouse"]
    );
    assert!(list(&app, "/por-categoria/2").await.is_empty());
    assert_eq!(names(&list(&app, "/por-proveedor/2").await), vec!["Keyboard"]);
}

#[tokio::test]
async fn test_by_category_non_integer_is_400() {
    let response = app().oneshot(get("/por-categoria/uno")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
