use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("`{field}` {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("unknown gender `{value}`")]
    UnknownGender { value: String },
    #[error("unknown field `{value}`")]
    UnknownField { value: String },
    #[error("unknown sort direction `{value}`")]
    UnknownDirection { value: String },
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
