//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council answers
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full deliberation: every stage plus ranking statistics
    Full,
    /// Only the chairman's final answer
    Final,
    /// JSON dump of the assistant message
    Json,
}

/// CLI arguments for council
#[derive(Parser, Debug)]
#[command(name = "council")]
#[command(version, about = "Terminal client for an LLM Council deliberation server")]
#[command(long_about = r#"
The council answers every question in three stages:
1. First opinions: each council model answers independently
2. Peer ranking: each model ranks the anonymized answers of its peers
3. Synthesis: the chairman model folds everything into one final answer

This client talks to a running council backend, streams the deliberation
as it happens, and renders the result in the terminal.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/council/config.toml   Global config

Example:
  council "What's the best way to handle errors in Rust?"
  council --chat
  council --list
  council --conversation 3f2a... "And a follow-up question"
"#)]
pub struct Cli {
    /// The question to ask the council (not required in chat or list mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List stored conversations and exit
    #[arg(short, long)]
    pub list: bool,

    /// Continue an existing conversation instead of creating a new one
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,

    /// Council backend base URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Use the non-streaming endpoint (single response, no progress)
    #[arg(long)]
    pub no_stream: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "final")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostics to this log file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}
