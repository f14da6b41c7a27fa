use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
    /// Submitted data was rejected; the message is shown to the user.
    #[error("{0}")]
    Form(String),
    /// A value did not satisfy a domain constraint.
    #[error("invalid data: {0}")]
    TypeConstraint(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
