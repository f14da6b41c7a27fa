pub mod calendar;
pub mod classes;
pub mod errors;
pub mod notes;

pub use errors::{ServiceError, ServiceResult};
