//! Schedule validation and calendar placement.
//!
//! Both halves are synchronous and free of I/O; callers pass in the class
//! snapshot explicitly.

pub mod book;
pub mod placement;
pub mod validator;
