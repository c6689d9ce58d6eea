//! Shared Diesel error classification for the repository adapters.
//!
//! PostgreSQL reports constraint violations with a kind and, usually, the
//! constraint name. Adapters match on the [`StoreFailure`] produced here and
//! translate it into their port's error variants.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, error};

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classified Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// A unique or primary key constraint rejected the write.
    Unique { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKey { constraint: Option<String> },
    /// A check constraint rejected the write.
    Check { constraint: Option<String> },
    /// The connection dropped mid-operation.
    Connection { message: String },
    /// Anything else.
    Query { message: String },
}

impl StoreFailure {
    /// Whether this is a violation of the named constraint.
    pub(crate) fn is_constraint(&self, name: &str) -> bool {
        match self {
            Self::Unique { constraint }
            | Self::ForeignKey { constraint }
            | Self::Check { constraint } => constraint.as_deref() == Some(name),
            Self::Connection { .. } | Self::Query { .. } => false,
        }
    }
}

/// Classify a Diesel error, logging the database error kind.
pub(crate) fn classify_diesel_error(err: DieselError) -> StoreFailure {
    match err {
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().map(str::to_owned);
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?constraint,
                "diesel operation failed"
            );
            match kind {
                DatabaseErrorKind::UniqueViolation => StoreFailure::Unique { constraint },
                DatabaseErrorKind::ForeignKeyViolation => StoreFailure::ForeignKey { constraint },
                DatabaseErrorKind::CheckViolation => StoreFailure::Check { constraint },
                DatabaseErrorKind::ClosedConnection => StoreFailure::Connection {
                    message: "database connection error".to_owned(),
                },
                _ => StoreFailure::Query {
                    message: "database error".to_owned(),
                },
            }
        }
        DieselError::NotFound => StoreFailure::Query {
            message: "record not found".to_owned(),
        },
        DieselError::QueryBuilderError(_) => StoreFailure::Query {
            message: "database query error".to_owned(),
        },
        other => {
            error!(error = %other, "unexpected diesel failure");
            StoreFailure::Query {
                message: "database error".to_owned(),
            }
        }
    }
}

/// Map the generic failures into connection/query constructors.
///
/// Constraint violations that an adapter does not handle itself are reported
/// as query errors naming the constraint.
pub(crate) fn map_basic_failure<E, Q, C>(failure: StoreFailure, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match failure {
        StoreFailure::Connection { message } => connection(message),
        StoreFailure::Query { message } => query(message),
        StoreFailure::Unique { constraint }
        | StoreFailure::ForeignKey { constraint }
        | StoreFailure::Check { constraint } => query(format!(
            "constraint violated: {}",
            constraint.as_deref().unwrap_or("unknown")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(DieselError::NotFound),
            StoreFailure::Query {
                message: "record not found".to_owned()
            }
        );
    }

    #[rstest]
    fn constraint_names_are_matched_exactly() {
        let failure = StoreFailure::Check {
            constraint: Some("follows_no_self_follow".to_owned()),
        };
        assert!(failure.is_constraint("follows_no_self_follow"));
        assert!(!failure.is_constraint("follows_follower_author_key"));
    }

    #[rstest]
    fn unhandled_constraints_surface_as_query_errors() {
        let message = map_basic_failure(
            StoreFailure::Unique {
                constraint: Some("tags_slug_key".to_owned()),
            },
            |m| format!("query: {m}"),
            |m| format!("connection: {m}"),
        );
        assert_eq!(message, "query: constraint violated: tags_slug_key");
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        assert_eq!(
            pool_error_message(PoolError::checkout("timed out")),
            "timed out"
        );
    }
}
