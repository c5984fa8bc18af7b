// Authentication extractor for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::identity::client::IdentityClient;
use crate::identity::error::IdentityError;
use crate::identity::models::Principal;

/// Extracts the authenticated principal from the Authorization header,
/// verifying the bearer token against the identity service.
/// Handlers that take a `Principal` argument are protected routes.
#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    IdentityClient: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(IdentityError::MissingToken)?
            .to_str()
            .map_err(|_| IdentityError::InvalidToken)?;

        // Verify Bearer token format
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(IdentityError::InvalidToken)?;

        IdentityClient::from_ref(state).verify(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::time::Duration;

    #[derive(Clone)]
    struct TestState {
        identity: IdentityClient,
    }

    impl FromRef<TestState> for IdentityClient {
        fn from_ref(state: &TestState) -> Self {
            state.identity.clone()
        }
    }

    fn test_state() -> TestState {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        TestState {
            // Never reached by the header-format tests below
            identity: IdentityClient::new(http, "http://127.0.0.1:1".to_string()),
        }
    }

    fn parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_missing_authorization_header_is_rejected() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let result = Principal::from_request_parts(&mut parts, &test_state()).await;
        assert!(matches!(result, Err(IdentityError::MissingToken)));
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_rejected() {
        let invalid_formats = vec![
            "Basic dXNlcjpwYXNz",
            "token_without_bearer",
            "InvalidFormat token",
        ];

        for auth_value in invalid_formats {
            let mut parts = parts_with_auth(auth_value);
            let result = Principal::from_request_parts(&mut parts, &test_state()).await;
            assert!(matches!(result, Err(IdentityError::InvalidToken)));
        }
    }
}
