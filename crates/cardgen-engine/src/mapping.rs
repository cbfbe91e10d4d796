//! Field mapping between note types.
//!
//! A [`FieldMapping`] relates destination field names to source field
//! names: each destination field draws its value from at most one source
//! field, and destinations without a chosen source are simply absent from
//! the mapping. [`mapping_choices`] produces the per-destination-field
//! option lists a frontend presents, with the same-name source field
//! pre-selected when one exists.

use std::collections::{BTreeMap, HashMap};

use cardgen::NoteInfo;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A destination-field to source-field mapping.
///
/// Keys are destination field names, unique by construction. The map is
/// ordered so a saved mapping serializes identically across runs.
///
/// # Example
///
/// ```
/// use cardgen_engine::mapping::FieldMapping;
///
/// let mut mapping = FieldMapping::new();
/// mapping.set("Front", "Word");
/// mapping.set("Back", "Reading");
/// assert_eq!(mapping.source_for("Front"), Some("Word"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: BTreeMap<String, String>,
}

impl FieldMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity mapping over field names present in both note types.
    ///
    /// Destination fields with no same-name source field are left
    /// unmapped.
    pub fn identity(dest_fields: &[String], source_fields: &[String]) -> Self {
        let mut mapping = Self::new();
        for dest in dest_fields {
            if source_fields.contains(dest) {
                mapping.set(dest.clone(), dest.clone());
            }
        }
        mapping
    }

    /// Map a destination field to a source field.
    ///
    /// Replaces any previous source for the same destination.
    pub fn set(&mut self, dest: impl Into<String>, source: impl Into<String>) {
        self.entries.insert(dest.into(), source.into());
    }

    /// Remove the mapping for a destination field, if any.
    pub fn unset(&mut self, dest: &str) {
        self.entries.remove(dest);
    }

    /// The source field mapped to a destination field, if any.
    pub fn source_for(&self, dest: &str) -> Option<&str> {
        self.entries.get(dest).map(String::as_str)
    }

    /// Whether no destination field is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mapped destination fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over (destination, source) pairs in destination order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(d, s)| (d.as_str(), s.as_str()))
    }

    /// Resolve field values for one source note.
    ///
    /// Each mapped destination field takes the source note's value for its
    /// source field. A source field absent on this particular note is
    /// silently skipped, not an error.
    pub fn resolve(&self, note: &NoteInfo) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        for (dest, source) in &self.entries {
            if let Some(field) = note.fields.get(source) {
                fields.insert(dest.clone(), field.value.clone());
            }
        }
        fields
    }

    /// Check that every mapped destination field exists on the
    /// destination note type.
    pub fn validate_against(&self, dest_model: &str, dest_fields: &[String]) -> Result<()> {
        for dest in self.entries.keys() {
            if !dest_fields.contains(dest) {
                return Err(Error::MissingField {
                    model: dest_model.to_string(),
                    field: dest.clone(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The choice set for one destination field.
///
/// A frontend renders one selection control per destination field,
/// offering "no mapping" plus every source field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingChoice {
    /// The destination field this choice is for.
    pub destination: String,
    /// All source fields available to map from.
    pub options: Vec<String>,
    /// The pre-selected source field: the same-name one when it exists.
    pub selected: Option<String>,
}

/// Build the per-destination-field choice lists for a pair of note types.
///
/// One entry per destination field, in destination field order; each
/// offers every source field, with the same-name source field
/// pre-selected when present.
pub fn mapping_choices(dest_fields: &[String], source_fields: &[String]) -> Vec<MappingChoice> {
    dest_fields
        .iter()
        .map(|dest| MappingChoice {
            destination: dest.clone(),
            options: source_fields.to_vec(),
            selected: source_fields.contains(dest).then(|| dest.clone()),
        })
        .collect()
}
