//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FOODGRAM_*` environment variables and an
//! optional config file. Unset values fall back to the defaults below.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, DEFAULT_NAME_MAX_LENGTH, RecipeLimits, RecipeLimitsError,
};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = PoolConfig::DEFAULT_MAX_SIZE;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error(transparent)]
    Limits(#[from] RecipeLimitsError),
}

/// Process-wide configuration for the service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOODGRAM")]
pub struct ServiceSettings {
    /// PostgreSQL URL. Without one the server runs on fixture ports.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    pub min_amount: Option<i32>,
    pub max_amount: Option<i32>,
    pub min_cooking_time: Option<i32>,
    pub max_cooking_time: Option<i32>,
    pub recipe_name_max_length: Option<usize>,
}

impl ServiceSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Validated recipe limits.
    pub fn recipe_limits(&self) -> Result<RecipeLimits, SettingsError> {
        Ok(RecipeLimits::try_new(
            (
                self.min_amount.unwrap_or(DEFAULT_MIN_VALUE),
                self.max_amount.unwrap_or(DEFAULT_MAX_VALUE),
            ),
            (
                self.min_cooking_time.unwrap_or(DEFAULT_MIN_VALUE),
                self.max_cooking_time.unwrap_or(DEFAULT_MAX_VALUE),
            ),
            self.recipe_name_max_length
                .unwrap_or(DEFAULT_NAME_MAX_LENGTH),
        )?)
    }
}
