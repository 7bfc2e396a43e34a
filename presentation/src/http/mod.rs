//! HTTP request boundary
//!
//! Validates `{topic, question}`, runs the pipeline and serializes the
//! response. Errors are mapped to status codes in [`error::ApiError`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
