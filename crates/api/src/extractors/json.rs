//! JSON body extractor with validation-style rejections.
//!
//! Axum's built-in `Json` rejects malformed bodies with 422; this wrapper
//! reports them as 400 validation errors so body-shape failures (missing
//! fields, wrong types) surface the same way as constraint violations.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Drop-in replacement for `axum::Json` on request bodies.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(map_rejection(rejection)),
        }
    }
}

impl<T> axum::response::IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

fn map_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::put;
    use axum::Router;
    use tower::ServiceExt;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    async fn handler(Json(_payload): Json<Payload>) -> impl IntoResponse {
        StatusCode::OK
    }

    #[tokio::test]
    async fn test_missing_field_maps_to_bad_request() {
        let app = Router::new().route("/", put(handler));
        let request = axum::http::Request::builder()
            .method("PUT")
            .uri("/")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let app = Router::new().route("/", put(handler));
        let request = axum::http::Request::builder()
            .method("PUT")
            .uri("/")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"name": "ok"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
