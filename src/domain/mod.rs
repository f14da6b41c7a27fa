//! Persistence-independent domain entities.

pub mod class;
pub mod note;
pub mod types;
