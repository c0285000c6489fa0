//! Conversions from external infrastructure errors into domain errors.

use haven_domain::HavenError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HavenError);

impl From<InfraError> for HavenError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HavenError> for InfraError {
    fn from(value: HavenError) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → HavenError */
/* -------------------------------------------------------------------------- */

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;

        let mapped = match err {
            SqlError::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match code.code {
                    ErrorCode::DatabaseBusy => HavenError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => HavenError::Database("database is locked".into()),
                    ErrorCode::ConstraintViolation => {
                        HavenError::Database("constraint violation".into())
                    }
                    _ => HavenError::Database(format!(
                        "sqlite failure {:?} (code {}): {message}",
                        code.code, code.extended_code
                    )),
                }
            }
            SqlError::QueryReturnedNoRows => {
                HavenError::NotFound("no rows returned by query".into())
            }
            SqlError::FromSqlConversionFailure(_, _, cause) => {
                HavenError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            SqlError::InvalidColumnType(_, _, ty) => {
                HavenError::Database(format!("invalid column type: {ty}"))
            }
            other => HavenError::Database(other.to_string()),
        };

        Self(mapped)
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → HavenError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(HavenError::Database(format!("connection pool error: {err}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HavenError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        Self(HavenError::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_maps_to_not_found() {
        let infra = InfraError::from(SqlError::QueryReturnedNoRows);
        assert!(matches!(HavenError::from(infra), HavenError::NotFound(_)));
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let json_err =
            serde_json::from_str::<haven_domain::EngagementState>("not json").unwrap_err();
        let infra = InfraError::from(json_err);
        assert!(matches!(HavenError::from(infra), HavenError::Serialization(_)));
    }
}
