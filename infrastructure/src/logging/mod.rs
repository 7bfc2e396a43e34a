//! Structured run logging
//!
//! Adapters implementing [`RunLogger`](assistant_application::RunLogger).

mod jsonl_logger;

pub use jsonl_logger::JsonlRunLogger;
