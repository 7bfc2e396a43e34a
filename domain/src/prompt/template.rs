//! Prompt templates for the generate stage

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Instruction wrapped around the topic for the generator model.
    ///
    /// The word range is only requested; nothing downstream enforces it.
    pub fn topic_paragraph(topic: &str) -> String {
        format!("Write a concise, informative paragraph (150-200 words) about: {topic}.")
    }

    /// Remove an echoed copy of `prompt` from the start of a generation.
    ///
    /// Text-generation runtimes may return the prompt followed by the
    /// continuation. The result is trimmed either way.
    pub fn strip_echo<'a>(prompt: &str, generated: &'a str) -> &'a str {
        generated
            .strip_prefix(prompt)
            .unwrap_or(generated)
            .trim()
    }
}
