//! Shared Diesel error mapping for the invitation repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Database messages are logged at debug level and replaced with fixed
/// strings so constraint names and SQL fragments never leave the adapter.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced row does not exist")
        }
        _ => query("database error"),
    }
}

/// Whether `error` reports a violation of the unique constraint `constraint`.
pub fn is_unique_violation_of(error: &DieselError, constraint: &str) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name() == Some(constraint)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for shared Diesel error mapping.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found"));
    }

    #[rstest]
    fn rollback_maps_to_generic_query() {
        assert_eq!(
            map(DieselError::RollbackTransaction),
            Mapped::Query("database error")
        );
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped: String = map_basic_pool_error(PoolError::checkout("timed out"), |m| m);
        assert_eq!(mapped, "timed out");
    }

    #[rstest]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation_of(
            &DieselError::NotFound,
            "users_device_identifier_key"
        ));
    }

    #[rstest]
    fn connection_variant_is_reachable() {
        let mapped: Mapped = map_basic_pool_error(PoolError::build("bad url"), |_| {
            Mapped::Connection("database connection error")
        });
        assert_eq!(mapped, Mapped::Connection("database connection error"));
    }
}
