//! Note-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use cardgen::{AnkiClient, NoteBuilder};
//!
//! # async fn example() -> cardgen::Result<()> {
//! let client = AnkiClient::new();
//!
//! let note = NoteBuilder::new("Default", "Basic")
//!     .field("Front", "Hello")
//!     .field("Back", "World")
//!     .tag("test")
//!     .build();
//!
//! let note_id = client.notes().add(note).await?;
//! println!("Created note: {}", note_id);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::{Note, NoteInfo};

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AddNoteParams {
    note: Note,
}

#[derive(Serialize)]
struct NotesInfoParams<'a> {
    notes: &'a [i64],
}

impl<'a> NoteActions<'a> {
    /// Add a new note.
    ///
    /// Returns the ID of the created note. AnkiConnect rejects duplicate
    /// notes with an error message; the caller decides how to handle it.
    pub async fn add(&self, note: Note) -> Result<i64> {
        self.client.invoke("addNote", AddNoteParams { note }).await
    }

    /// Get detailed information about notes.
    ///
    /// The `notes` parameter also accepts card identifiers; AnkiConnect
    /// resolves each to its owning note. Passing several cards of the
    /// same note yields that note more than once.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cardgen::AnkiClient;
    /// # async fn example() -> cardgen::Result<()> {
    /// let client = AnkiClient::new();
    ///
    /// let card_ids = client.cards().find("deck:Default").await?;
    /// let notes = client.notes().info(&card_ids).await?;
    ///
    /// for note in notes {
    ///     println!("Note {}: {:?}", note.note_id, note.tags);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn info(&self, ids: &[i64]) -> Result<Vec<NoteInfo>> {
        self.client
            .invoke("notesInfo", NotesInfoParams { notes: ids })
            .await
    }
}
