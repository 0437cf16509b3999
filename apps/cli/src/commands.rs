//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docbot_lookup::{Command as ChatCommand, DocsCommand, DocsResolver};
use docbot_shared::{AppConfig, LookupConfig, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docbot: PHP manual summaries for chat.
#[derive(Parser)]
#[command(
    name = "docbot",
    version,
    about = "Look up PHP manual entries the way the chat bot answers them.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.docbot/docbot.toml.
    #[arg(long, env = "DOCBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Look up a PHP term and print the chat message.
    Docs {
        /// Search terms (joined with spaces).
        terms: Vec<String>,

        /// Override the manual site root (e.g. https://www.php.net).
        #[arg(long)]
        base_url: Option<String>,

        /// Override the per-request timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Classify a raw chat event payload (JSON file, or - for stdin).
    Events {
        /// Path to the payload.
        file: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docbot=info",
        1 => "docbot=debug",
        _ => "docbot=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout carries only the message.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Docs {
            terms,
            base_url,
            timeout,
        } => cmd_docs(&config, terms, base_url, timeout).await,
        Command::Events { file } => cmd_events(&file),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_docs(
    config: &AppConfig,
    terms: Vec<String>,
    base_url: Option<String>,
    timeout: Option<u64>,
) -> Result<()> {
    let mut lookup = LookupConfig::from(config);
    if let Some(base_url) = base_url {
        lookup.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(timeout) = timeout {
        lookup.timeout_secs = timeout;
    }

    let command = ChatCommand::new(docbot_lookup::COMMAND_NAME, terms);
    if !DocsCommand::<docbot_lookup::HttpFetcher>::accepts(&command) {
        info!("no search terms given, nothing to look up");
        return Ok(());
    }

    let docs = DocsCommand::new(DocsResolver::from_config(&lookup)?);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("bad progress template: {e}"))?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(format!("Looking up {}", command.parameters.join(" ")));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let message = docs.handle(&command).await;
    spinner.finish_and_clear();

    if let Some(message) = message {
        println!("{message}");
    }

    Ok(())
}

fn cmd_events(file: &str) -> Result<()> {
    let json = if file == "-" {
        std::io::read_to_string(std::io::stdin())
            .map_err(|e| eyre!("failed to read stdin: {e}"))?
    } else {
        std::fs::read_to_string(file).map_err(|e| eyre!("failed to read '{file}': {e}"))?
    };

    let events = docbot_events::classify_str(&json)?;
    info!(count = events.len(), "classified events");

    for (id, event) in &events {
        match event.record() {
            Some(record) => println!(
                "{id}\t{}\t{}\t{}",
                event.kind(),
                record.user_name.as_deref().unwrap_or("-"),
                record.content.as_deref().unwrap_or("")
            ),
            None => println!("{id}\t{}", event.kind()),
        }
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config written to {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| eyre!("serialize config: {e}"))?;
    println!("{content}");
    Ok(())
}
