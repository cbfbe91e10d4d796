//! The card generation run.
//!
//! A run copies a random sample of mature cards from a source
//! deck/note-type into a destination deck/note-type, remapping fields
//! along the way. The run is a linear sequence: validate, search, sample,
//! fetch notes, create notes one at a time. Per-note creation failures
//! are recorded and do not halt the run; a run-level failure (the search
//! itself failing, say) aborts the remaining steps but leaves the system
//! ready for another run.

use cardgen::{AnkiClient, NoteBuilder, QueryBuilder};
use rand::Rng;

use crate::config::StoredConfig;
use crate::error::{Error, Result};
use crate::mapping::FieldMapping;
use crate::sample;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Deck the source cards are drawn from.
    pub source_deck: String,
    /// Deck the new notes are created in.
    pub dest_deck: String,
    /// Note type of the source cards.
    pub source_model: String,
    /// Note type of the created notes.
    pub dest_model: String,
    /// Requested number of notes to create.
    pub count: usize,
    /// Destination-field to source-field mapping.
    pub field_mapping: FieldMapping,
}

impl From<StoredConfig> for GenerateConfig {
    fn from(config: StoredConfig) -> Self {
        Self {
            source_deck: config.source_deck,
            dest_deck: config.dest_deck,
            source_model: config.source_model,
            dest_model: config.dest_model,
            count: config.count,
            field_mapping: config.field_mapping,
        }
    }
}

/// One attempted note creation, in sampled order.
#[derive(Debug, Clone)]
pub struct CreateAttempt {
    /// The source note the new note was built from.
    pub source_note_id: i64,
    /// The created note ID, or the error message for this item.
    pub outcome: std::result::Result<i64, String>,
}

/// Report of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Cards matching the search before sampling.
    pub matched: usize,
    /// Cards selected by the sampling step.
    pub sampled: usize,
    /// Notes successfully created.
    pub created: usize,
    /// Note creations that failed.
    pub failed: usize,
    /// Every creation attempt, in order.
    pub attempts: Vec<CreateAttempt>,
}

/// Preview of a generation run: what would happen, without creating notes.
#[derive(Debug, Clone)]
pub struct GeneratePreview {
    /// Whether the source model exists.
    pub source_model_exists: bool,
    /// Whether the destination model exists.
    pub dest_model_exists: bool,
    /// Fields of the source model.
    pub source_fields: Vec<String>,
    /// Fields of the destination model.
    pub dest_fields: Vec<String>,
    /// Cards matching the search.
    pub matched: usize,
    /// Problems with the configured field mapping.
    pub mapping_issues: Vec<String>,
}

/// Generation workflow engine.
#[derive(Debug)]
pub struct GenerateEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> GenerateEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Run a generation with the thread-local RNG.
    pub async fn run(&self, config: &GenerateConfig) -> Result<GenerateReport> {
        self.run_with_rng(config, &mut rand::rng()).await
    }

    /// Run a generation with a caller-supplied RNG.
    ///
    /// Sampling is the only randomized step, so a seeded RNG makes the
    /// whole run reproducible.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cardgen_engine::Engine;
    /// # use cardgen_engine::generate::GenerateConfig;
    /// # use cardgen_engine::mapping::FieldMapping;
    /// # async fn example() -> cardgen_engine::Result<()> {
    /// let engine = Engine::new();
    ///
    /// let mut field_mapping = FieldMapping::new();
    /// field_mapping.set("Front", "Word");
    /// field_mapping.set("Back", "Reading");
    ///
    /// let config = GenerateConfig {
    ///     source_deck: "Japanese".to_string(),
    ///     dest_deck: "Japanese::Review".to_string(),
    ///     source_model: "Vocab".to_string(),
    ///     dest_model: "Review".to_string(),
    ///     count: 2,
    ///     field_mapping,
    /// };
    ///
    /// let report = engine.generate().run(&config).await?;
    /// println!("Created {} of {} sampled", report.created, report.sampled);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_with_rng(
        &self,
        config: &GenerateConfig,
        rng: &mut impl Rng,
    ) -> Result<GenerateReport> {
        // Local validation happens before any remote call.
        validate_selections(config)?;

        // Remote validation: both models must exist, and every mapped
        // destination field must exist on the destination model.
        let models = self.client.models().names().await?;
        if !models.contains(&config.source_model) {
            return Err(Error::ModelNotFound(config.source_model.clone()));
        }
        if !models.contains(&config.dest_model) {
            return Err(Error::ModelNotFound(config.dest_model.clone()));
        }
        let dest_fields = self.client.models().field_names(&config.dest_model).await?;
        config
            .field_mapping
            .validate_against(&config.dest_model, &dest_fields)?;

        let query = build_query(config);
        let card_ids = self.client.cards().find(&query).await?;
        if card_ids.is_empty() {
            return Err(Error::NoCardsFound(query));
        }

        let mut report = GenerateReport {
            matched: card_ids.len(),
            ..Default::default()
        };

        let sampled_ids = sample::take_sample(card_ids, config.count, rng);
        report.sampled = sampled_ids.len();

        let notes = self.client.notes().info(&sampled_ids).await?;

        for info in notes {
            let mut builder = NoteBuilder::new(&config.dest_deck, &config.dest_model);
            for (dest, value) in config.field_mapping.resolve(&info) {
                builder = builder.field(dest, value);
            }
            // Tags carry over verbatim.
            let note = builder.tags(info.tags.iter().cloned()).build();

            let outcome = match self.client.notes().add(note).await {
                Ok(id) => {
                    report.created += 1;
                    Ok(id)
                }
                Err(e) => {
                    report.failed += 1;
                    Err(e.to_string())
                }
            };
            report.attempts.push(CreateAttempt {
                source_note_id: info.note_id,
                outcome,
            });
        }

        Ok(report)
    }

    /// Preview a generation run without creating notes.
    ///
    /// Runs the same validation and search as [`run`](Self::run) and
    /// reports what a run would work with.
    pub async fn preview(&self, config: &GenerateConfig) -> Result<GeneratePreview> {
        validate_selections(config)?;

        let models = self.client.models().names().await?;
        let source_model_exists = models.contains(&config.source_model);
        let dest_model_exists = models.contains(&config.dest_model);

        let source_fields = if source_model_exists {
            self.client.models().field_names(&config.source_model).await?
        } else {
            Vec::new()
        };
        let dest_fields = if dest_model_exists {
            self.client.models().field_names(&config.dest_model).await?
        } else {
            Vec::new()
        };

        let mut mapping_issues = Vec::new();
        for (dest, source) in config.field_mapping.iter() {
            if dest_model_exists && !dest_fields.iter().any(|f| f == dest) {
                mapping_issues.push(format!("destination field '{}' not found", dest));
            }
            if source_model_exists && !source_fields.iter().any(|f| f == source) {
                mapping_issues.push(format!("source field '{}' not found", source));
            }
        }

        let matched = if source_model_exists {
            self.client.cards().find(&build_query(config)).await?.len()
        } else {
            0
        };

        Ok(GeneratePreview {
            source_model_exists,
            dest_model_exists,
            source_fields,
            dest_fields,
            matched,
            mapping_issues,
        })
    }
}

/// Search for mature cards of the source deck and note type.
fn build_query(config: &GenerateConfig) -> String {
    QueryBuilder::new()
        .deck(&config.source_deck)
        .note_type(&config.source_model)
        .mature()
        .build()
}

fn validate_selections(config: &GenerateConfig) -> Result<()> {
    if config.source_deck.is_empty() {
        return Err(Error::Validation("source deck is not selected".to_string()));
    }
    if config.dest_deck.is_empty() {
        return Err(Error::Validation(
            "destination deck is not selected".to_string(),
        ));
    }
    if config.source_model.is_empty() {
        return Err(Error::Validation(
            "source note type is not selected".to_string(),
        ));
    }
    if config.dest_model.is_empty() {
        return Err(Error::Validation(
            "destination note type is not selected".to_string(),
        ));
    }
    if config.count == 0 {
        return Err(Error::Validation(
            "requested count must be a positive integer".to_string(),
        ));
    }
    if config.field_mapping.is_empty() {
        return Err(Error::Validation(
            "no field mappings configured".to_string(),
        ));
    }
    Ok(())
}
