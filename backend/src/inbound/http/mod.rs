//! HTTP inbound adapter exposing the REST API.
//!
//! Handlers depend only on the driving ports bundled in [`state::HttpState`];
//! [`router`] holds the explicit method/path table.

pub mod auth;
pub mod catalogue;
pub mod error;
pub mod health;
pub mod pagination;
pub mod recipes;
pub mod recipes_dto;
pub mod relationships;
pub mod router;
pub mod schemas;
pub mod shopping_list;
pub mod state;
pub mod subscriptions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
