//! Card-related AnkiConnect actions.
//!
//! Cards are generated from notes - one note can produce multiple cards.

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to card-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::cards()`].
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct FindCardsParams<'a> {
    query: &'a str,
}

impl<'a> CardActions<'a> {
    /// Find cards matching a query.
    ///
    /// Returns a list of card IDs. The query uses Anki's search syntax;
    /// see [`QueryBuilder`](crate::QueryBuilder) for assembling it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cardgen::{AnkiClient, QueryBuilder};
    /// # async fn example() -> cardgen::Result<()> {
    /// let client = AnkiClient::new();
    ///
    /// let query = QueryBuilder::new().deck("Japanese").mature().build();
    /// let cards = client.cards().find(&query).await?;
    /// println!("Found {} mature cards", cards.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .invoke("findCards", FindCardsParams { query })
            .await
    }
}
