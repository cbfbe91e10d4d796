//! Tests for deck AnkiConnect actions.

mod common;

use cardgen::AnkiClient;
use common::{mock_action, mock_anki_error, mock_anki_response, setup_mock_server};

#[tokio::test]
async fn test_deck_names() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        mock_anki_response(vec!["Default", "Japanese", "Japanese::Vocab"]),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let decks = client.decks().names().await.unwrap();

    assert_eq!(decks, vec!["Default", "Japanese", "Japanese::Vocab"]);
}

#[tokio::test]
async fn test_deck_names_error() {
    let server = setup_mock_server().await;
    mock_action(&server, "deckNames", mock_anki_error("collection is not available")).await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().names().await.unwrap_err();

    match err {
        cardgen::Error::AnkiConnect(msg) => {
            assert_eq!(msg, "collection is not available");
        }
        other => panic!("expected AnkiConnect error, got {:?}", other),
    }
}
