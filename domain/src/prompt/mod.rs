//! Prompt domain
//!
//! Templates for the text the generate stage sends to the generator model.

mod template;

pub use template::PromptTemplate;
