//! Core domain concepts shared across the pipeline.
//!
//! - [`model::ModelRole`] - the four model roles (generator, summarizer, ...)
//! - [`model::ModelCatalog`] - which hub model serves each role
//! - [`request::AssistantRequest`] - a validated (topic, question) pair
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod request;
