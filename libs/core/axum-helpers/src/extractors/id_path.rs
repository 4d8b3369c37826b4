use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Single integer path parameter, e.g. `/productos/{id}`.
///
/// Anything that does not parse as an `i32` is rejected with 400 `INVALID_ID`
/// before the handler runs.
///
/// ```ignore
/// async fn get_producto(IdPath(id): IdPath) -> String {
///     format!("producto {}", id)
/// }
///
/// let app = Router::new().route("/productos/{id}", get(get_producto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.body_text()))?;

        raw.trim()
            .parse::<i32>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/productos/{id}",
            get(|IdPath(id): IdPath| async move { id.to_string() }),
        )
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_accepts_integer() {
        assert_eq!(status_of("/productos/42").await, StatusCode::OK);
        assert_eq!(status_of("/productos/-3").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_non_integer() {
        assert_eq!(status_of("/productos/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/productos/1.5").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/productos/99999999999").await, StatusCode::BAD_REQUEST);
    }
}
