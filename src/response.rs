use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Uniform wrapper returned by every external-facing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub data: serde_json::Value,
    pub status: Status,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
            status: Status::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            data: serde_json::Value::String(msg.into()),
            status: Status::Error,
        }
    }
}

/// `axum::Json` with its rejection converted at the boundary, so a
/// malformed body comes back as an `ApiResponse` error envelope like
/// every other failure.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};

    #[test]
    fn success_envelope_has_lowercase_status_tag() {
        let json = serde_json::to_string(&ApiResponse::success(42)).unwrap();
        assert!(json.contains(r#""status":"success""#));
        assert!(json.contains(r#""data":42"#));
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let json = serde_json::to_string(&ApiResponse::error("Missing Headers")).unwrap();
        assert!(json.contains(r#""status":"error""#));
        assert!(json.contains("Missing Headers"));
    }

    #[tokio::test]
    async fn malformed_body_rejects_into_the_envelope() {
        #[derive(serde::Deserialize)]
        struct Dummy {
            #[allow(dead_code)]
            isbn: i64,
        }

        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let err = match Json::<Dummy>::from_request(req, &()).await {
            Ok(_) => panic!("malformed body must be rejected"),
            Err(e) => e,
        };
        assert!(matches!(err, AppError::Validation(_)));

        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains(r#""status":"error""#));
    }
}
