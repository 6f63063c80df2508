//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::StreamProgressReporter;
use council_application::ports::council_gateway::CouncilGateway;
use council_application::ports::session_observer::NoObserver;
use council_application::use_cases::chat_session::ChatSession;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Interactive chat REPL
pub struct ChatRepl<G: CouncilGateway + 'static> {
    session: ChatSession<G>,
    show_progress: bool,
}

impl<G: CouncilGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(session: ChatSession<G>) -> Self {
        Self {
            session,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("council").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Council - Chat Mode               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask anything; the council deliberates in three stages.");
        println!();
        println!("Commands:");
        println!("  /help           - Show this help");
        println!("  /list           - List conversations");
        println!("  /new            - Start a new conversation");
        println!("  /open <id>      - Open an existing conversation");
        println!("  /quit           - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, cmd: &str) -> bool {
        let mut parts = cmd.splitn(2, ' ');
        let head = parts.next().unwrap_or(cmd);

        match head {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /list            - List conversations");
                println!("  /new             - Start a new conversation");
                println!("  /open <id>       - Open an existing conversation");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/list" => {
                match self.session.refresh_conversations().await {
                    Ok(summaries) => {
                        println!("{}", ConsoleFormatter::format_conversation_list(summaries));
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
                false
            }
            "/new" => {
                match self.session.new_conversation().await {
                    Ok(conversation) => {
                        println!("Started conversation {}", conversation.id);
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
                false
            }
            "/open" => {
                match parts.next().map(str::trim).filter(|id| !id.is_empty()) {
                    Some(id) => match self.session.select_conversation(id).await {
                        Ok(conversation) => {
                            let title = if conversation.title.is_empty() {
                                conversation.id.as_str()
                            } else {
                                conversation.title.as_str()
                            };
                            println!(
                                "Opened \"{}\" ({} messages)",
                                title,
                                conversation.messages.len()
                            );
                        }
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    None => println!("Usage: /open <conversation-id>"),
                }
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&mut self, content: &str) {
        println!();

        // First message in the session: create a conversation lazily.
        if self.session.current().is_none()
            && let Err(e) = self.session.new_conversation().await
        {
            eprintln!("Error: {}", e);
            return;
        }

        if self.show_progress {
            let progress = StreamProgressReporter::new();
            self.session.send_message(content, &progress).await;
        } else {
            self.session.send_message(content, &NoObserver).await;
        }

        if let Some(message) = self.session.current().and_then(|c| c.last_assistant()) {
            println!("{}", ConsoleFormatter::format_final_only(message));
        }
        println!();
    }
}
