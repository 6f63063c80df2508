//! Output formatter trait

use council_domain::AssistantMessage;

/// Trait for rendering a council answer
pub trait OutputFormatter {
    /// Format the complete deliberation
    fn format(&self, message: &AssistantMessage) -> String;

    /// Format as JSON
    fn format_json(&self, message: &AssistantMessage) -> String;

    /// Format the final answer only (concise output)
    fn format_final_only(&self, message: &AssistantMessage) -> String;
}
