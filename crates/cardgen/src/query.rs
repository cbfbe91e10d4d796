//! Builder for Anki search queries.
//!
//! The query grammar is owned by Anki; this builder only assembles the
//! handful of clauses cardgen needs - exact deck match, exact note type
//! match, and the fixed maturity filter - instead of string concatenation
//! at the call sites.
//!
//! # Example
//!
//! ```
//! use cardgen::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .deck("Japanese")
//!     .note_type("Vocab")
//!     .mature()
//!     .build();
//!
//! assert_eq!(
//!     query,
//!     "deck:\"Japanese\" note:\"Vocab\" (\"is:review\" -\"is:learn\") AND \"prop:ivl>=21\" AND -(\"is:buried\" OR \"is:suspended\")"
//! );
//! ```

/// A card is considered mature once it is in review (not still learning),
/// scheduled at least 21 days out, and neither buried nor suspended.
const MATURE_FILTER: &str =
    r#"("is:review" -"is:learn") AND "prop:ivl>=21" AND -("is:buried" OR "is:suspended")"#;

/// A builder for constructing Anki search queries.
#[derive(Debug, Clone, Default)]
#[must_use = "QueryBuilder does nothing until .build() is called"]
pub struct QueryBuilder {
    parts: Vec<String>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Filter by exact deck name.
    ///
    /// The name is always quoted, so deck names containing spaces or
    /// `::` hierarchy separators match exactly.
    ///
    /// # Example
    ///
    /// ```
    /// use cardgen::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().deck("My Deck").build();
    /// assert_eq!(q, "deck:\"My Deck\"");
    /// ```
    pub fn deck(mut self, name: &str) -> Self {
        self.parts.push(format!("deck:\"{}\"", escape_quotes(name)));
        self
    }

    /// Filter by exact note type (model) name.
    ///
    /// # Example
    ///
    /// ```
    /// use cardgen::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().note_type("Basic").build();
    /// assert_eq!(q, "note:\"Basic\"");
    /// ```
    pub fn note_type(mut self, model: &str) -> Self {
        self.parts.push(format!("note:\"{}\"", escape_quotes(model)));
        self
    }

    /// Restrict to mature cards.
    ///
    /// Appends the fixed maturity filter: reviewed (not in initial
    /// learning), interval of at least 21 days, neither buried nor
    /// suspended.
    pub fn mature(mut self) -> Self {
        self.parts.push(MATURE_FILTER.to_string());
        self
    }

    /// Add a raw query string.
    ///
    /// Escape hatch for query syntax not covered by the builder.
    pub fn raw(mut self, query: &str) -> Self {
        self.parts.push(query.to_string());
        self
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('"', "\\\"")
}
