//! Tests for card AnkiConnect actions.

mod common;

use cardgen::AnkiClient;
use common::{mock_action, mock_anki_response, setup_mock_server};

#[tokio::test]
async fn test_find_cards() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "findCards",
        mock_anki_response(vec![1_i64, 2, 3, 4, 5]),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let cards = client.cards().find("deck:\"Japanese\"").await.unwrap();

    assert_eq!(cards, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_find_cards_empty() {
    let server = setup_mock_server().await;
    mock_action(&server, "findCards", mock_anki_response(Vec::<i64>::new())).await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let cards = client.cards().find("deck:\"NonExistent\"").await.unwrap();

    assert!(cards.is_empty());
}
