//! Diesel row types and their conversions into domain entities.

pub mod class;
#[cfg(feature = "server")]
pub mod config;
pub mod note;
