//! Token injection for the REST transport.
//!
//! Credential bootstrapping (service-account files, metadata servers, token
//! refresh) lives outside this workspace; the connector only needs something
//! that can hand it a bearer token per request.

use async_trait::async_trait;
use tendenza_core::TendenzaError;

/// Supplies an OAuth2 bearer token for each warehouse call.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return a token valid for the next request.
    async fn access_token(&self) -> Result<String, TendenzaError>;
}

/// Fixed-token provider for tests and short-lived sessions.
pub struct StaticTokenProvider(String);

impl StaticTokenProvider {
    /// Wrap a pre-acquired token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TendenzaError> {
        Ok(self.0.clone())
    }
}
