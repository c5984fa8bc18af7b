// HTTP client for the external identity service

use crate::identity::error::IdentityError;
use crate::identity::models::Principal;
use reqwest::StatusCode;
use tracing::debug;

/// Client for verifying bearer tokens against the identity service
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new IdentityClient.
    /// The reqwest client is expected to carry a bounded request timeout.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Verify a bearer token and return the authenticated principal.
    ///
    /// # Errors
    /// * `InvalidToken` - the identity service rejected the token
    /// * `Unavailable` - the identity service could not be reached or
    ///   answered with something other than the canonical principal shape
    pub async fn verify(&self, token: &str) -> Result<Principal, IdentityError> {
        let endpoint = format!("{}/api/auth/verify", self.base_url);

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let principal = response
                    .json::<Principal>()
                    .await
                    .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
                debug!("Verified token for user {}", principal.id);
                Ok(principal)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(IdentityError::InvalidToken),
            status => Err(IdentityError::Unavailable(format!(
                "identity service returned {}",
                status
            ))),
        }
    }
}
