//! Command-line card copier for Anki via AnkiConnect.
//!
//! Copies a random sample of mature cards from one deck/note-type into
//! another, remapping fields along the way. Selections are kept in a
//! single stored configuration record, so a run is usually just
//! `cardgen generate`.

use std::path::PathBuf;

use cardgen_engine::config::{ConfigStore, FileStore, StoredConfig};
use cardgen_engine::generate::GenerateConfig;
use cardgen_engine::mapping::{self, FieldMapping};
use cardgen_engine::{ClientBuilder, Engine, Error};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

/// Copy mature cards between Anki decks and note types.
#[derive(Parser, Debug)]
#[command(name = "cardgen")]
#[command(version, about, long_about = None)]
struct Args {
    /// AnkiConnect host address
    #[arg(long, default_value = "localhost")]
    host: String,

    /// AnkiConnect port
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List deck names
    Decks,

    /// List note type names
    Models,

    /// List the fields of a note type
    Fields {
        /// Note type name
        model: String,
    },

    /// Show the field mapping choices for a pair of note types
    Map {
        /// Source note type (defaults to the stored selection)
        #[arg(long)]
        source_model: Option<String>,

        /// Destination note type (defaults to the stored selection)
        #[arg(long)]
        dest_model: Option<String>,
    },

    /// Update the stored selections
    Set {
        /// Deck the source cards are drawn from
        #[arg(long)]
        source_deck: Option<String>,

        /// Deck the new notes are created in
        #[arg(long)]
        dest_deck: Option<String>,

        /// Note type of the source cards
        #[arg(long)]
        source_model: Option<String>,

        /// Note type of the created notes
        #[arg(long)]
        dest_model: Option<String>,

        /// Number of notes to create per run
        #[arg(long)]
        count: Option<usize>,

        /// Map a destination field to a source field, as DEST=SOURCE (repeatable)
        #[arg(long = "map", value_name = "DEST=SOURCE", value_parser = parse_map_entry)]
        mappings: Vec<(String, String)>,

        /// Drop all stored field mappings
        #[arg(long)]
        clear_mapping: bool,
    },

    /// Print the stored configuration
    Show,

    /// Validate the configuration and count matching cards, creating nothing
    Preview,

    /// Copy a random sample of mature cards
    Generate {
        /// Override the stored count for this run
        #[arg(long)]
        count: Option<usize>,
    },
}

fn parse_map_entry(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((dest, source)) if !dest.is_empty() && !source.is_empty() => {
            Ok((dest.to_string(), source.to_string()))
        }
        _ => Err(format!("expected DEST=SOURCE, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing; the log is the primary run output.
    let log_level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let url = format!("http://{}:{}", args.host, args.port);
    let client = ClientBuilder::new().url(&url).build();
    let engine = Engine::from_client(client);

    let store = match args.config {
        Some(path) => FileStore::new(path),
        None => FileStore::at_default(),
    };

    match args.command {
        Command::Decks => list_decks(&engine).await,
        Command::Models => list_models(&engine).await,
        Command::Fields { model } => list_fields(&engine, &model).await,
        Command::Map {
            source_model,
            dest_model,
        } => show_mapping_choices(&engine, &store, source_model, dest_model).await,
        Command::Set {
            source_deck,
            dest_deck,
            source_model,
            dest_model,
            count,
            mappings,
            clear_mapping,
        } => {
            set_config(
                &engine,
                &store,
                SetRequest {
                    source_deck,
                    dest_deck,
                    source_model,
                    dest_model,
                    count,
                    mappings,
                    clear_mapping,
                },
            )
            .await
        }
        Command::Show => show_config(&store),
        Command::Preview => preview(&engine, &store).await,
        Command::Generate { count } => generate(&engine, &store, count).await,
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

async fn list_decks(engine: &Engine) -> CliResult {
    let decks = engine.client().decks().names().await?;
    info!("Loaded {} decks", decks.len());
    for name in decks {
        println!("{}", name);
    }
    Ok(())
}

async fn list_models(engine: &Engine) -> CliResult {
    let models = engine.client().models().names().await?;
    info!("Loaded {} note types", models.len());
    for name in models {
        println!("{}", name);
    }
    Ok(())
}

async fn list_fields(engine: &Engine, model: &str) -> CliResult {
    let fields = engine.client().models().field_names(model).await?;
    for name in fields {
        println!("{}", name);
    }
    Ok(())
}

/// Print the per-destination-field choices, with same-name defaults.
async fn show_mapping_choices(
    engine: &Engine,
    store: &FileStore,
    source_model: Option<String>,
    dest_model: Option<String>,
) -> CliResult {
    let stored = store.load()?.unwrap_or_default();
    let source_model = source_model.unwrap_or(stored.source_model);
    let dest_model = dest_model.unwrap_or(stored.dest_model);
    if source_model.is_empty() || dest_model.is_empty() {
        return Err("both note types are required; pass --source-model/--dest-model or store them with 'set'".into());
    }

    let source_fields = engine.client().models().field_names(&source_model).await?;
    let dest_fields = engine.client().models().field_names(&dest_model).await?;

    info!("Field mapping choices for {} -> {}", source_model, dest_model);
    for choice in mapping::mapping_choices(&dest_fields, &source_fields) {
        match &choice.selected {
            Some(source) => println!("{} <- {}", choice.destination, source),
            None => println!("{} <- (unmapped)", choice.destination),
        }
        println!("  options: {}", choice.options.join(", "));
    }
    Ok(())
}

struct SetRequest {
    source_deck: Option<String>,
    dest_deck: Option<String>,
    source_model: Option<String>,
    dest_model: Option<String>,
    count: Option<usize>,
    mappings: Vec<(String, String)>,
    clear_mapping: bool,
}

/// Apply updates to the stored record and write the full snapshot back.
async fn set_config(engine: &Engine, store: &FileStore, request: SetRequest) -> CliResult {
    let mut config = store.load()?.unwrap_or_default();

    let model_changed = request
        .source_model
        .as_ref()
        .is_some_and(|m| *m != config.source_model)
        || request
            .dest_model
            .as_ref()
            .is_some_and(|m| *m != config.dest_model);

    if let Some(deck) = request.source_deck {
        config.source_deck = deck;
    }
    if let Some(deck) = request.dest_deck {
        config.dest_deck = deck;
    }
    if let Some(model) = request.source_model {
        config.source_model = model;
    }
    if let Some(model) = request.dest_model {
        config.dest_model = model;
    }
    if let Some(count) = request.count {
        config.count = count;
    }

    if request.clear_mapping {
        config.field_mapping = FieldMapping::new();
    }

    // Changing either note type re-derives the same-name default mapping,
    // unless this invocation sets the mapping explicitly.
    if model_changed
        && request.mappings.is_empty()
        && !request.clear_mapping
        && !config.source_model.is_empty()
        && !config.dest_model.is_empty()
    {
        let source_fields = engine
            .client()
            .models()
            .field_names(&config.source_model)
            .await?;
        let dest_fields = engine
            .client()
            .models()
            .field_names(&config.dest_model)
            .await?;
        config.field_mapping = FieldMapping::identity(&dest_fields, &source_fields);
        info!(
            "Reset field mapping to {} same-name defaults",
            config.field_mapping.len()
        );
    }

    for (dest, source) in request.mappings {
        config.field_mapping.set(dest, source);
    }

    store.save(&config)?;
    info!("Configuration saved to {}", store.path().display());
    Ok(())
}

fn show_config(store: &FileStore) -> CliResult {
    match store.load()? {
        Some(config) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        None => {
            warn!("No configuration stored yet; run 'cardgen set' first");
            Ok(())
        }
    }
}

fn load_run_config(store: &FileStore, count: Option<usize>) -> Result<StoredConfig, Box<dyn std::error::Error>> {
    let mut config = store
        .load()?
        .ok_or("no configuration stored yet; run 'cardgen set' first")?;
    if let Some(count) = count {
        config.count = count;
    }
    Ok(config)
}

async fn preview(engine: &Engine, store: &FileStore) -> CliResult {
    let config = GenerateConfig::from(load_run_config(store, None)?);
    let preview = engine.generate().preview(&config).await?;

    if !preview.source_model_exists {
        warn!("Source note type '{}' does not exist", config.source_model);
    }
    if !preview.dest_model_exists {
        warn!("Destination note type '{}' does not exist", config.dest_model);
    }
    for issue in &preview.mapping_issues {
        warn!("Mapping issue: {}", issue);
    }
    info!(
        "{} mature cards match in deck '{}' ({} would be copied)",
        preview.matched,
        config.source_deck,
        preview.matched.min(config.count)
    );
    Ok(())
}

async fn generate(engine: &Engine, store: &FileStore, count: Option<usize>) -> CliResult {
    let stored = load_run_config(store, count)?;
    // A count override is a user-visible change; snapshot it like any other.
    store.save(&stored)?;
    let config = GenerateConfig::from(stored);

    info!("Connecting to AnkiConnect...");
    let version = engine.client().misc().version().await?;
    info!("Connected to AnkiConnect v{}", version);

    info!(
        "Finding mature cards in deck \"{}\" of type \"{}\"...",
        config.source_deck, config.source_model
    );

    let report = match engine.generate().run(&config).await {
        Ok(report) => report,
        Err(Error::NoCardsFound(query)) => {
            warn!("No matching cards found for query: {}", query);
            return Ok(());
        }
        Err(e) => {
            error!("Generation run failed: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Found {} matching cards, sampled {}",
        report.matched, report.sampled
    );
    for attempt in &report.attempts {
        match &attempt.outcome {
            Ok(id) => info!(
                "Created note {} from source note {}",
                id, attempt.source_note_id
            ),
            Err(msg) => warn!(
                "Failed to create note from source note {}: {}",
                attempt.source_note_id, msg
            ),
        }
    }
    info!("Finished. Successfully created {} notes", report.created);
    Ok(())
}
