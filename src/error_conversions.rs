//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

#[cfg(feature = "server")]
use crate::forms::classes::ClassFormError;
#[cfg(feature = "server")]
use crate::forms::notes::NoteFormError;
#[cfg(feature = "server")]
use crate::services::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<ClassFormError> for ServiceError {
    fn from(val: ClassFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<NoteFormError> for ServiceError {
    fn from(val: NoteFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
