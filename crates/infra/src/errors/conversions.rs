//! Conversions from external infrastructure errors into domain errors.

use fieldlog_domain::FieldLogError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FieldLogError);

impl From<InfraError> for FieldLogError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FieldLogError> for InfraError {
    fn from(value: FieldLogError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoFieldLogError {
    fn into_fieldlog(self) -> FieldLogError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → FieldLogError */
/* -------------------------------------------------------------------------- */

impl IntoFieldLogError for SqlError {
    fn into_fieldlog(self) -> FieldLogError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        FieldLogError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        FieldLogError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        FieldLogError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        FieldLogError::Database("foreign key constraint violation".into())
                    }
                    _ => FieldLogError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => FieldLogError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                FieldLogError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                FieldLogError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                FieldLogError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                FieldLogError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => FieldLogError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => FieldLogError::Database("invalid SQL query".into()),
            other => FieldLogError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_fieldlog())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → FieldLogError */
/* -------------------------------------------------------------------------- */

impl IntoFieldLogError for r2d2::Error {
    fn into_fieldlog(self) -> FieldLogError {
        FieldLogError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_fieldlog())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → FieldLogError */
/* -------------------------------------------------------------------------- */

impl IntoFieldLogError for serde_json::Error {
    fn into_fieldlog(self) -> FieldLogError {
        FieldLogError::Storage(format!("JSON serialization failed: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_fieldlog())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → FieldLogError */
/* -------------------------------------------------------------------------- */

impl IntoFieldLogError for std::io::Error {
    fn into_fieldlog(self) -> FieldLogError {
        FieldLogError::Storage(format!("I/O error: {self}"))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_fieldlog())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use rusqlite::Error as SqlError;

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: FieldLogError = InfraError::from(err).into();
        match mapped {
            FieldLogError::Database(msg) => {
                assert!(msg.contains("busy") || msg.contains("locked"));
            }
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped: FieldLogError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        match mapped {
            FieldLogError::NotFound(msg) => assert!(msg.contains("no rows")),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn unique_violation_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::ConstraintViolation, extended_code: 2067 },
            None,
        );

        let mapped: FieldLogError = InfraError::from(err).into();
        match mapped {
            FieldLogError::Database(msg) => assert!(msg.contains("unique")),
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn io_error_maps_to_storage_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let mapped: FieldLogError = InfraError::from(err).into();
        match mapped {
            FieldLogError::Storage(msg) => assert!(msg.contains("missing file")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn json_error_maps_to_storage_error() {
        let err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let mapped: FieldLogError = InfraError::from(err).into();
        assert!(matches!(mapped, FieldLogError::Storage(_)));
    }
}
