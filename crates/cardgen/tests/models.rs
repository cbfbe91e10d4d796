//! Tests for model AnkiConnect actions.

mod common;

use cardgen::AnkiClient;
use common::{mock_action, mock_anki_error, mock_anki_response, setup_mock_server};

#[tokio::test]
async fn test_model_names() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "modelNames",
        mock_anki_response(vec!["Basic", "Basic (and reversed card)", "Cloze"]),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let models = client.models().names().await.unwrap();

    assert_eq!(models.len(), 3);
    assert_eq!(models[0], "Basic");
}

#[tokio::test]
async fn test_model_field_names() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "modelFieldNames",
        mock_anki_response(vec!["Front", "Back"]),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let fields = client.models().field_names("Basic").await.unwrap();

    assert_eq!(fields, vec!["Front", "Back"]);
}

#[tokio::test]
async fn test_model_field_names_unknown_model() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "modelFieldNames",
        mock_anki_error("model was not found: Nope"),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.models().field_names("Nope").await.unwrap_err();

    assert!(matches!(err, cardgen::Error::AnkiConnect(_)));
}
