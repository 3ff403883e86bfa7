// Milon command line interface
// Vocabulary import console, store listing, and setup checks

mod console;

use clap::{Parser, Subcommand};
use milon_core::config::ImporterConfig;
use milon_engine::ImportEngine;
use milon_store::{feed, next_unresolved, words::WordFile};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "milon")]
#[command(about = "Milon vocabulary importer - build a word collection with images and audio", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON or TOML); environment variables otherwise
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive import console
    Import {
        /// Source feed file, overriding the configured path
        #[arg(long)]
        feed: Option<PathBuf>,

        /// Start with a manually entered English term instead of the feed
        #[arg(long)]
        word: Option<String>,
    },

    /// List the committed word collection
    List {
        /// Only show entries carrying this tag
        #[arg(long, short)]
        tag: Option<String>,

        /// Print full entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration and report feed progress
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Import { feed, word } => {
            run_import(config, feed, word).await?;
        }
        Commands::List { tag, json } => {
            list_words(&config, tag.as_deref(), json)?;
        }
        Commands::Check => {
            run_check(&config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ImporterConfig> {
    let config = match path {
        Some(path) => ImporterConfig::load_from_file(path)?,
        None => ImporterConfig::from_env(),
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

async fn run_import(
    mut config: ImporterConfig,
    feed_override: Option<PathBuf>,
    word: Option<String>,
) -> anyhow::Result<()> {
    if let Some(path) = feed_override {
        config.paths.import_feed = path;
    }
    info!("Words file: {}", config.paths.words_file.display());

    let engine = ImportEngine::new(config)?;
    let mut console = console::ImportConsole::new(engine);
    console.run(word).await
}

fn list_words(config: &ImporterConfig, tag: Option<&str>, json: bool) -> anyhow::Result<()> {
    let store = WordFile::load(&config.paths.words_file)?;
    let entries: Vec<_> = store
        .words
        .iter()
        .filter(|w| tag.map_or(true, |t| w.tags.iter().any(|wt| wt == t)))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{:<20} {:<12} {}  [{}]",
            entry.id,
            entry.english,
            entry.hebrew,
            entry.tags.join(", ")
        );
    }
    println!("{} entries", entries.len());
    Ok(())
}

fn run_check(config: &ImporterConfig) -> anyhow::Result<()> {
    println!("Configuration: OK");
    println!("  words file:  {}", config.paths.words_file.display());
    println!("  images dir:  {}", config.paths.images_dir.display());
    println!("  audio dir:   {}", config.paths.audio_dir.display());
    println!("  import feed: {}", config.paths.import_feed.display());
    println!("  translator:  {} ({})", config.translator.provider, config.translator.endpoint);
    println!("  speech:      {} / {}", config.speech.engine, config.speech.accent);

    let store = WordFile::load(&config.paths.words_file)?;
    println!("Store: {} entries", store.words.len());

    let rows = feed::load_import_rows(&config.paths.import_feed)?;
    let ids = store.ids();
    let remaining = rows
        .iter()
        .filter(|row| !ids.contains(&row.id))
        .count();
    println!("Feed: {} rows, {} unresolved", rows.len(), remaining);
    if let Some(index) = next_unresolved(&rows, 0, &ids) {
        println!("Next: row {} ({})", index, rows[index].english);
    }
    Ok(())
}
