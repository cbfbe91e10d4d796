//! Card copying workflows for Anki via AnkiConnect.
//!
//! This crate builds the cardgen workflows on top of the [`cardgen`]
//! client library. While `cardgen` provides 1:1 API bindings, this crate
//! combines them into the tool's operations: field-mapping synthesis,
//! uniform card sampling, the generation run, and the persisted
//! configuration record.
//!
//! # Quick Start
//!
//! ```no_run
//! use cardgen_engine::Engine;
//! use cardgen_engine::generate::GenerateConfig;
//! use cardgen_engine::mapping::FieldMapping;
//!
//! # async fn example() -> cardgen_engine::Result<()> {
//! let engine = Engine::new();
//!
//! let mut field_mapping = FieldMapping::new();
//! field_mapping.set("Front", "Word");
//!
//! let config = GenerateConfig {
//!     source_deck: "Japanese".to_string(),
//!     dest_deck: "Japanese::Review".to_string(),
//!     source_model: "Vocab".to_string(),
//!     dest_model: "Review".to_string(),
//!     count: 5,
//!     field_mapping,
//! };
//!
//! let report = engine.generate().run(&config).await?;
//! println!("Created {} notes", report.created);
//!
//! // Direct client access when needed
//! let version = engine.client().misc().version().await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub mod config;
pub mod generate;
pub mod mapping;
pub mod sample;

pub use error::{Error, Result};

// Re-export cardgen types for convenience
pub use cardgen::{
    AnkiClient, ClientBuilder, Note, NoteBuilder, NoteField, NoteInfo, QueryBuilder,
};

use generate::GenerateEngine;

/// Workflow engine for the card copier.
///
/// The engine wraps an [`AnkiClient`] and provides access to the
/// generation workflow.
///
/// # Example
///
/// ```no_run
/// use cardgen_engine::Engine;
///
/// // Create with default client settings
/// let engine = Engine::new();
///
/// // Or with a custom client
/// let client = cardgen_engine::AnkiClient::builder()
///     .url("http://localhost:8765")
///     .build();
/// let engine = Engine::from_client(client);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    client: AnkiClient,
}

impl Engine {
    /// Create a new engine with default client settings.
    ///
    /// Connects to AnkiConnect at `http://localhost:8765`.
    pub fn new() -> Self {
        Self {
            client: AnkiClient::new(),
        }
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: AnkiClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    ///
    /// Use this for direct API access when the workflow doesn't cover
    /// your use case.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    /// Access the generation workflow.
    pub fn generate(&self) -> GenerateEngine<'_> {
        GenerateEngine::new(&self.client)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
