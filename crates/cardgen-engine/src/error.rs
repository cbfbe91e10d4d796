//! Error types for cardgen-engine.
//!
//! Errors from engine workflows fall into two categories:
//!
//! 1. **Client errors**: Wrapped from the underlying [`cardgen::Error`] type
//! 2. **Workflow errors**: Specific to engine operations (e.g., model not found)
//!
//! # Example
//!
//! ```no_run
//! use cardgen_engine::{Engine, Error};
//! # use cardgen_engine::generate::GenerateConfig;
//!
//! # async fn example(config: GenerateConfig) {
//! let engine = Engine::new();
//!
//! match engine.generate().run(&config).await {
//!     Ok(report) => println!("Created {} notes", report.created),
//!     Err(Error::NoCardsFound(query)) => {
//!         eprintln!("No matching cards for: {}", query);
//!     }
//!     Err(Error::Client(cardgen::Error::ConnectionRefused)) => {
//!         eprintln!("Is Anki running?");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;

/// Result type for cardgen-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during engine operations.
///
/// Engine errors wrap lower-level client errors and add workflow-specific
/// error variants for common failure cases.
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying cardgen client.
    Client(cardgen::Error),

    /// A model (note type) was not found.
    ModelNotFound(String),

    /// A mapped field is missing from a model.
    MissingField {
        /// The model name.
        model: String,
        /// The missing field name.
        field: String,
    },

    /// No cards matched the query.
    NoCardsFound(String),

    /// A validation error occurred.
    Validation(String),

    /// An I/O error occurred (configuration store).
    Io(std::io::Error),

    /// A serialization error occurred (configuration store).
    Json(serde_json::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::ModelNotFound(name) => write!(f, "model not found: {}", name),
            Error::MissingField { model, field } => {
                write!(f, "missing field '{}' for model '{}'", field, model)
            }
            Error::NoCardsFound(query) => write!(f, "no cards found for query: {}", query),
            Error::Validation(msg) => write!(f, "validation error: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl From<cardgen::Error> for Error {
    fn from(err: cardgen::Error) -> Self {
        Error::Client(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
