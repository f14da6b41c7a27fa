pub mod classes;
pub mod notes;
