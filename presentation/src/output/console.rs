//! Console output formatter for council answers

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{
    AssistantMessage, ConversationSummary, CouncilPhase, format_average_rank, short_model_name,
};

/// Formats council answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete deliberation
    pub fn format(message: &AssistantMessage) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Council Deliberation"));
        output.push('\n');

        // Stage 1: First Opinions
        output.push_str(&Self::section_header("Stage 1: First Opinions"));
        if message.stage1.is_empty() {
            output.push_str("\n(no council responses)\n");
        }
        for response in &message.stage1 {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", short_model_name(&response.model))
                    .yellow()
                    .bold(),
                response.response
            ));
        }

        // Stage 2: Peer Rankings (if any)
        if !message.stage2.is_empty() {
            output.push_str(&Self::section_header("Stage 2: Peer Rankings"));
            for ranking in &message.stage2 {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── ranked by {} ──", short_model_name(&ranking.model))
                        .yellow()
                        .bold(),
                    ranking.ranking
                ));
                if let Some(order) = ranking
                    .parsed_ranking
                    .as_deref()
                    .filter(|order| !order.is_empty())
                {
                    output.push_str(&format!(
                        "{} {}\n",
                        "Order:".dimmed(),
                        order.join(" > ")
                    ));
                }
            }
        }

        // Aggregate rankings, in server order
        if let Some(aggregates) = message
            .metadata
            .as_ref()
            .map(|m| &m.aggregate_rankings)
            .filter(|a| !a.is_empty())
        {
            output.push_str(&format!("\n{}\n", "Aggregate Ranking:".cyan().bold()));
            for (position, entry) in aggregates.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} - avg rank {} ({} votes)\n",
                    position + 1,
                    short_model_name(&entry.model).bold(),
                    format_average_rank(entry.average_rank),
                    entry.rankings_count
                ));
            }
        }

        // Stage 3: Final Synthesis
        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        match &message.stage3 {
            Some(synthesis) => {
                output.push_str(&format!(
                    "\n{}\n\n{}\n",
                    format!("Chairman: {}", short_model_name(&synthesis.model))
                        .yellow()
                        .bold(),
                    synthesis.response
                ));
            }
            None => output.push_str("\n(no final answer)\n"),
        }

        if let CouncilPhase::Errored { message: reason } = &message.phase {
            output.push_str(&format!(
                "\n{} {}\n",
                "Deliberation failed:".red().bold(),
                reason
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(message: &AssistantMessage) -> String {
        serde_json::to_string_pretty(message).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_final_only(message: &AssistantMessage) -> String {
        if let CouncilPhase::Errored { message: reason } = &message.phase {
            return format!("{} {}", "Deliberation failed:".red().bold(), reason);
        }

        match &message.stage3 {
            Some(synthesis) => format!(
                "{}\n\n{}",
                format!("=== Final answer ({}) ===", short_model_name(&synthesis.model))
                    .cyan()
                    .bold(),
                synthesis.response
            ),
            None => "(the council produced no final answer)".dimmed().to_string(),
        }
    }

    /// Format the conversation list for display
    pub fn format_conversation_list(summaries: &[ConversationSummary]) -> String {
        if summaries.is_empty() {
            return "No conversations yet.".dimmed().to_string();
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Conversations:".cyan().bold()));
        for summary in summaries {
            output.push_str(&format!(
                "  {}  {} {}\n",
                summary.id.dimmed(),
                summary.title.bold(),
                format!("({} messages)", summary.message_count).dimmed()
            ));
        }
        output
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

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, message: &AssistantMessage) -> String {
        Self::format(message)
    }

    fn format_json(&self, message: &AssistantMessage) -> String {
        Self::format_json(message)
    }

    fn format_final_only(&self, message: &AssistantMessage) -> String {
        Self::format_final_only(message)
    }
}
