//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only PostgreSQL persistence lives here. Adapters are thin translators
//! between domain types and storage representations; they contain no
//! business logic.

pub mod persistence;
