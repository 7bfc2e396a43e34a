//! Console output formatter for assistant responses

use assistant_application::PipelineError;
use assistant_domain::AssistantResponse;
use colored::Colorize;

/// Formats assistant responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete response, one section per stage
    pub fn format(response: &AssistantResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Multilingual Assistant"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Topic:".cyan().bold(),
            response.topic
        ));

        output.push_str(&Self::section_header("Generated Text"));
        output.push_str(&format!("{}\n", response.generated_text));

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("{}\n", response.summary));

        output.push_str(&Self::section_header("Summary (French)"));
        output.push_str(&format!("{}\n", response.translated_summary_fr));

        let qa = &response.question_answer;
        output.push_str(&Self::section_header("Question Answering"));
        output.push_str(&format!("{} {}\n", "Q:".bold(), qa.question));
        match (&qa.answer, qa.score) {
            (Some(answer), Some(score)) => output.push_str(&format!(
                "{} {} {}\n",
                "A:".bold(),
                answer.green(),
                format!("(score {:.2})", score).dimmed()
            )),
            (Some(answer), None) => {
                output.push_str(&format!("{} {}\n", "A:".bold(), answer.green()))
            }
            (None, _) => output.push_str(&format!(
                "{} {}\n",
                "A:".bold(),
                "no answer found in the generated text".yellow()
            )),
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(response: &AssistantResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line error summary naming the failed stage or role
    pub fn format_error(error: &PipelineError) -> String {
        let location = match (error.stage(), error.role()) {
            (Some(stage), _) => format!("[{}] ", stage),
            (None, Some(role)) => format!("[{} model] ", role),
            (None, None) => String::new(),
        };
        format!("{} {}{}", "Error:".red().bold(), location, error)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
