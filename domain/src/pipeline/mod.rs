//! Pipeline domain
//!
//! Stages, their dependency graph, fixed parameters, and the values passed
//! between them. Every value is an immutable snapshot handed forward.

pub mod params;
pub mod stage;
pub mod value_objects;
