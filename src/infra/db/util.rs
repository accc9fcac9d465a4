use crate::application::repos::RepoError;

// Postgres SQLSTATE codes the roster tables can raise.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const INTEGRITY_CLASS: &str = "23";
const STRING_TOO_LONG: &str = "22001";
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
const QUERY_CANCELED: &str = "57014";

/// Translates a sqlx failure into the repository error the services understand.
///
/// A duplicate country name surfaces as `Duplicate { constraint:
/// "countries_name_key" }` and an unknown `country_id` as `InvalidInput`.
pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::PoolTimedOut => RepoError::Timeout,
        sqlx::Error::Database(db) => {
            let code = db.code();
            classify_database_error(code.as_deref(), db.message(), db.constraint())
        }
        other => RepoError::from_persistence(other),
    }
}

fn classify_database_error(
    code: Option<&str>,
    message: &str,
    constraint: Option<&str>,
) -> RepoError {
    match code.unwrap_or_default() {
        UNIQUE_VIOLATION => RepoError::Duplicate {
            constraint: constraint.unwrap_or("unknown").to_string(),
        },
        FOREIGN_KEY_VIOLATION | STRING_TOO_LONG | INVALID_TEXT_REPRESENTATION => {
            RepoError::InvalidInput {
                message: message.to_string(),
            }
        }
        QUERY_CANCELED => RepoError::Timeout,
        code if code.starts_with(INTEGRITY_CLASS) => RepoError::Integrity {
            message: message.to_string(),
        },
        _ => RepoError::from_persistence(message),
    }
}
