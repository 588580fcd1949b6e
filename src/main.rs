//! faqbot binary: Telegram bot, console chat, and catalog utilities.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use faqbot::catalog::bootstrap::{BootstrapOutcome, CatalogLoader};
use faqbot::catalog::memory::InMemoryFaqRepository;
use faqbot::catalog::seed::JsonSeedFile;
use faqbot::catalog::sqlite::SqliteFaqRepository;
use faqbot::catalog::{FaqRepository, Language};
use faqbot::config::{self, Config};
use faqbot::console::{self, ConsoleGateway};
use faqbot::conversation::StateMachine;
use faqbot::render::Renderer;
use faqbot::responder::Responder;
use faqbot::search::SearchEngine;

/// Bilingual FAQ bot for international students.
#[derive(Debug, Parser)]
#[command(name = "faqbot", version, about)]
struct Cli {
    /// Path to config.toml (default: ~/.faqbot/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bootstrap the catalog and run the Telegram bot.
    Start,
    /// Talk to the bot on the terminal.
    Chat {
        /// User id for the console session.
        #[arg(long, default_value_t = 1)]
        user: i64,
    },
    /// Print the questions matching a query.
    Search {
        /// Free-text query.
        query: String,
        /// Language code (ru or en).
        #[arg(long, default_value = "ru")]
        lang: String,
    },
    /// Seed an empty catalog and report the outcome.
    Seed {
        /// Seed file overriding `[catalog] seed_path`.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_dir()?.join("config.toml"),
    };

    match cli.command {
        Command::Start => {
            let logs_dir = config_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("logs");
            let _guard = faqbot::logging::init_production(&logs_dir)?;
            let config = config::load_or_default(&config_path)?;
            cmd_start(&config).await
        }
        Command::Chat { user } => {
            faqbot::logging::init_cli();
            let config = config::load_or_default(&config_path)?;
            cmd_chat(&config, user).await
        }
        Command::Search { query, lang } => {
            faqbot::logging::init_cli();
            let config = config::load_or_default(&config_path)?;
            cmd_search(&config, &query, &lang).await
        }
        Command::Seed { file } => {
            faqbot::logging::init_cli();
            let mut config = config::load_or_default(&config_path)?;
            if let Some(file) = file {
                config.catalog.seed_path = file;
            }
            cmd_seed(&config).await
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn cmd_start(config: &Config) -> Result<()> {
    let token_env = &config.telegram.bot_token_env;
    let token = std::env::var(token_env)
        .with_context(|| format!("telegram bot token not set (expected in ${token_env})"))?;

    let responder = Arc::new(build_responder(config).await);
    info!("faqbot ready");
    faqbot::telegram::run_telegram(&token, responder).await
}

async fn cmd_chat(config: &Config, user: i64) -> Result<()> {
    let responder = build_responder(config).await;
    let gateway = ConsoleGateway::new(tokio::io::stdout());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    console::run_chat(&responder, user, stdin, &gateway).await
}

async fn cmd_search(config: &Config, query: &str, lang: &str) -> Result<()> {
    let language = Language::from_code(lang)
        .with_context(|| format!("unsupported language {lang:?} (expected ru or en)"))?;
    let loader = build_loader(config).await;
    let engine = SearchEngine::new(loader.catalog().await, config.search.keyword_match);

    let results = engine.search(query, language);
    if results.is_empty() {
        println!("no matches");
    }
    for record in results {
        println!("{}\t{}\t{}", record.id, record.category, record.question);
    }
    Ok(())
}

async fn cmd_seed(config: &Config) -> Result<()> {
    let loader = build_loader(config).await;
    match loader.outcome().await {
        BootstrapOutcome::AlreadyPopulated { count } => {
            println!("catalog already holds {count} records, seed not loaded");
        }
        BootstrapOutcome::Seeded { count } => println!("seeded {count} records"),
        BootstrapOutcome::Failed { reason } => anyhow::bail!("seeding failed: {reason}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Open the configured database, falling back to an in-memory catalog so the
/// bot keeps answering (with whatever it has) when the file is unusable.
async fn build_loader(config: &Config) -> CatalogLoader {
    let repo: Arc<dyn FaqRepository> =
        match SqliteFaqRepository::open(&config.catalog.database).await {
            Ok(repo) => Arc::new(repo),
            Err(e) => {
                error!(
                    path = %config.catalog.database.display(),
                    error = %e,
                    "failed to open faq database, using in-memory catalog"
                );
                Arc::new(InMemoryFaqRepository::new())
            }
        };
    let seed = Arc::new(JsonSeedFile::new(&config.catalog.seed_path));
    CatalogLoader::new(repo, seed)
}

async fn build_responder(config: &Config) -> Responder {
    let loader = build_loader(config).await;
    let catalog = loader.catalog().await;
    info!(records = catalog.len(), "catalog ready");

    let engine = SearchEngine::new(catalog, config.search.keyword_match);
    let machine = StateMachine::new(engine, config.conversation.history_depth);
    let renderer = Renderer::new(config.conversation.question_label_max_chars);
    Responder::new(machine, renderer)
}
