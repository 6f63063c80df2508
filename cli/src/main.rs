//! CLI entrypoint for the council client
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use council_application::ports::session_observer::NoObserver;
use council_application::use_cases::chat_session::ChatSession;
use council_infrastructure::{
    ConfigLoader, HttpCouncilGateway, JsonlTranscriptLogger, default_transcript_path,
};
use council_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormat, StreamProgressReporter,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // Keep the non-blocking writer guard alive for the whole run.
    let _log_guard = match cli.log_file {
        Some(ref path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let filename = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("council.log"));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(
                    directory, filename,
                ));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
            None
        }
    };

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", config.to_toml());
        return Ok(());
    }

    let base_url = cli
        .server_url
        .clone()
        .unwrap_or_else(|| config.server.base_url.clone());
    info!("Council backend: {}", base_url);

    // === Dependency Injection ===
    let gateway = Arc::new(HttpCouncilGateway::new(base_url));
    let mut session = ChatSession::new(gateway);

    if config.transcript.enabled
        && let Some(path) = default_transcript_path(config.transcript.dir.as_deref())
        && let Some(logger) = JsonlTranscriptLogger::new(&path)
    {
        info!("Writing deliberation transcript to {}", path.display());
        session = session.with_transcript(Arc::new(logger));
    }

    // List mode
    if cli.list {
        let summaries = session.refresh_conversations().await?;
        println!("{}", ConsoleFormatter::format_conversation_list(summaries));
        return Ok(());
    }

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(session).with_progress(!cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(ref q) => q.clone(),
        None => bail!("A question is required. Use --chat for interactive mode."),
    };

    match cli.conversation {
        Some(ref id) => {
            session.select_conversation(id).await?;
        }
        None => {
            session.new_conversation().await?;
        }
    }

    if cli.no_stream {
        session.send_message_blocking(&question).await?;
    } else if cli.quiet {
        session.send_message(&question, &NoObserver).await;
    } else {
        let progress = StreamProgressReporter::new();
        session.send_message(&question, &progress).await;
    }

    let Some(message) = session.current().and_then(|c| c.last_assistant()) else {
        bail!("The council returned no answer");
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(message),
        OutputFormat::Final => ConsoleFormatter::format_final_only(message),
        OutputFormat::Json => ConsoleFormatter::format_json(message),
    };

    println!("{}", output);

    Ok(())
}
