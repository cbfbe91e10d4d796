//! An async AnkiConnect client covering the actions cardgen needs.
//!
//! This crate wraps the AnkiConnect HTTP convention (`POST` with
//! `{action, version, params}`, response `{result, error}`) in typed
//! method calls. It is deliberately narrow: only the actions used by the
//! card-copying workflows in `cardgen-engine` are exposed.
//!
//! # Quick Start
//!
//! ```no_run
//! use cardgen::AnkiClient;
//!
//! # async fn example() -> cardgen::Result<()> {
//! // Create a client with default settings (localhost:8765)
//! let client = AnkiClient::new();
//!
//! // Check that AnkiConnect is running
//! let version = client.misc().version().await?;
//! println!("AnkiConnect version: {}", version);
//!
//! // List decks
//! let decks = client.decks().names().await?;
//! println!("Decks: {:?}", decks);
//! # Ok(())
//! # }
//! ```
//!
//! # Client Configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use cardgen::AnkiClient;
//!
//! let client = AnkiClient::builder()
//!     .url("http://localhost:8765")
//!     .timeout(Duration::from_secs(60))
//!     .build();
//! ```
//!
//! # Action Groups
//!
//! - [`AnkiClient::decks()`] - List decks
//! - [`AnkiClient::models()`] - List note types and their fields
//! - [`AnkiClient::cards()`] - Search for cards
//! - [`AnkiClient::notes()`] - Fetch note data and add notes
//! - [`AnkiClient::misc()`] - Version probe
//!
//! # Requirements
//!
//! - Anki must be running with the AnkiConnect add-on installed
//! - By default, the client connects to `http://localhost:8765`

pub mod actions;
pub mod client;
pub mod error;
pub mod query;
mod request;
pub mod types;

pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Result};
pub use query::QueryBuilder;
pub use types::{Note, NoteBuilder, NoteField, NoteInfo};
