//! Port resolving API access tokens to users.
//!
//! Tokens are issued elsewhere; this service only looks them up.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by access token repository adapters.
    pub enum AccessTokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "access token repository connection failed: {message}",
        /// The lookup failed.
        Query { message: String } =>
            "access token repository query failed: {message}",
    }
}

/// Port mapping a token key to the user it was issued to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Resolve `key`, returning `None` for unknown tokens.
    async fn resolve(&self, key: &str) -> Result<Option<UserId>, AccessTokenRepositoryError>;
}

/// Fixture implementation that treats any UUID-shaped token as the id of the
/// user it authenticates. Intended for local runs without a database and for
/// handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccessTokenRepository;

#[async_trait]
impl AccessTokenRepository for FixtureAccessTokenRepository {
    async fn resolve(&self, key: &str) -> Result<Option<UserId>, AccessTokenRepositoryError> {
        Ok(key.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_resolves_uuid_tokens_only() {
        let user = UserId::random();
        let repo = FixtureAccessTokenRepository;
        assert_eq!(
            repo.resolve(&user.to_string()).await.expect("lookup"),
            Some(user)
        );
        assert_eq!(repo.resolve("opaque").await.expect("lookup"), None);
    }
}
