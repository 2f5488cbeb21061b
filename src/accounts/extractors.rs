use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Extracts the `Key` / `Token` credential pair from the request headers.
/// Absent or empty headers reject with 401 "Missing Headers" before any
/// store access happens.
#[derive(Debug)]
pub struct Credentials {
    pub key: String,
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
                .unwrap_or_default()
        };

        let key = header("Key");
        let token = header("Token");
        if key.is_empty() || token.is_empty() {
            return Err(AppError::missing_headers());
        }

        Ok(Credentials { key, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<Credentials, AppError> {
        let (mut parts, _) = req.into_parts();
        Credentials::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn both_headers_present() {
        let req = Request::builder()
            .header("Key", "1")
            .header("Token", "secret")
            .body(())
            .unwrap();
        let creds = extract(req).await.expect("extraction should succeed");
        assert_eq!(creds.key, "1");
        assert_eq!(creds.token, "secret");
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let req = Request::builder().header("Key", "1").body(()).unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing Headers");
    }

    #[tokio::test]
    async fn empty_headers_count_as_missing() {
        let req = Request::builder()
            .header("Key", "")
            .header("Token", "")
            .body(())
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing Headers");
    }
}
