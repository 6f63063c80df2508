//! Progress reporting for a streaming council deliberation

use colored::Colorize;
use council_application::ports::session_observer::SessionObserver;
use council_domain::{AssistantMessage, CouncilPhase};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports deliberation progress with a live spinner per stage.
///
/// Driven entirely through [`SessionObserver`] callbacks: the spinner text
/// follows the message's phase as stream events are applied.
pub struct StreamProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl StreamProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    fn running_message(phase: &CouncilPhase) -> Option<&'static str> {
        match phase {
            CouncilPhase::Stage1Running => Some("Stage 1/3: collecting council answers..."),
            CouncilPhase::Stage2Running => Some("Stage 2/3: peer ranking in progress..."),
            CouncilPhase::Stage3Running => Some("Stage 3/3: chairman synthesizing..."),
            _ => None,
        }
    }

    fn done_message(phase: &CouncilPhase) -> Option<&'static str> {
        match phase {
            CouncilPhase::Stage1Done => Some("Stage 1/3: council answers collected"),
            CouncilPhase::Stage2Done => Some("Stage 2/3: peer rankings in"),
            CouncilPhase::Stage3Done => Some("Stage 3/3: final answer ready"),
            _ => None,
        }
    }
}

impl Default for StreamProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for StreamProgressReporter {
    fn on_assistant_updated(&self, _conversation_id: &str, message: &AssistantMessage) {
        let mut guard = self.spinner.lock().unwrap();

        if let Some(text) = Self::running_message(&message.phase) {
            let bar = guard.get_or_insert_with(|| {
                let bar = ProgressBar::new_spinner();
                bar.set_style(Self::spinner_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            });
            bar.set_message(text);
            return;
        }

        if let Some(text) = Self::done_message(&message.phase)
            && let Some(bar) = guard.as_ref()
        {
            bar.println(format!("{} {}", "v".green(), text));
        }

        if message.phase.is_terminal()
            && let Some(bar) = guard.take()
        {
            bar.finish_and_clear();
        }
    }

    fn on_title_assigned(&self, _conversation_id: &str, title: &str) {
        let guard = self.spinner.lock().unwrap();
        let line = format!("{} {}", "Conversation titled:".dimmed(), title);
        match guard.as_ref() {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    fn on_stream_error(&self, _conversation_id: &str, message: &str) {
        eprintln!("{} {}", "x".red(), message);
    }

    fn on_send_finished(&self, _conversation_id: &str) {
        // Clear any spinner left behind by a stream that ended abruptly.
        if let Some(bar) = self.spinner.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl SessionObserver for SimpleProgress {
    fn on_assistant_updated(&self, _conversation_id: &str, message: &AssistantMessage) {
        if let Some(text) = StreamProgressReporter::done_message(&message.phase) {
            println!("{} {}", "v".green(), text);
        }
    }

    fn on_stream_error(&self, _conversation_id: &str, message: &str) {
        eprintln!("{} {}", "x".red(), message);
    }
}
