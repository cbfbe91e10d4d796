//! Types shared across AnkiConnect actions.

mod note;

pub use note::{Note, NoteBuilder, NoteField, NoteInfo};
