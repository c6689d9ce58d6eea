//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use foodgram::domain::RecipeLimits;
use foodgram::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) limits: RecipeLimits,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, limits: RecipeLimits) -> Self {
        Self {
            bind_addr,
            limits,
            db_pool: None,
        }
    }

    /// Attach a database pool. Without one every port is served by its
    /// fixture implementation.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
