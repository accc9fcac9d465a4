use std::error::Error as StdError;

use thiserror::Error;
use uuid::Uuid;

use crate::{application::repos::RepoError, domain::error::DomainError, infra::error::InfraError};

/// Error message chain captured for reporting at the process edge.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("required argument `{0}` was not supplied")]
    MissingArgument(&'static str),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{entity} `{id}` does not exist")]
    InvalidReference { entity: &'static str, id: Uuid },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Caller mistakes that retrying cannot fix.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidReference { .. }
                | AppError::Domain(DomainError::Validation { .. })
                | AppError::Domain(DomainError::UnknownGender { .. })
                | AppError::Domain(DomainError::UnknownField { .. })
                | AppError::Domain(DomainError::UnknownDirection { .. })
        )
    }

    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingArgument(_) => 2,
            _ if self.is_validation() => 3,
            AppError::Repo(_) | AppError::Infra(InfraError::Database { .. }) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_validation_errors() {
        assert!(AppError::validation("duplicate").is_validation());
        assert!(
            AppError::InvalidReference {
                entity: "person",
                id: Uuid::nil()
            }
            .is_validation()
        );
        assert!(AppError::from(DomainError::validation("name", "can't be blank")).is_validation());
        assert!(!AppError::MissingArgument("request").is_validation());
        assert!(!AppError::from(RepoError::Timeout).is_validation());
    }

    #[test]
    fn report_collects_source_chain() {
        let err = AppError::from(InfraError::from(std::io::Error::other("disk gone")));
        let report = ErrorReport::from_error("test", &err);
        assert_eq!(report.messages, vec!["io error: disk gone", "disk gone"]);
        assert_eq!(err.exit_code(), 1);
    }
}
