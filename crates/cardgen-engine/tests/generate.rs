//! Tests for the generation workflow.

mod common;

use cardgen_engine::Error;
use cardgen_engine::generate::GenerateConfig;
use cardgen_engine::mapping::FieldMapping;
use common::{
    engine_for_mock, mock_action, mock_action_times, mock_anki_error, mock_anki_response,
    setup_mock_server,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wiremock::matchers::{body_partial_json, method};
use wiremock::Mock;

fn vocab_to_review_config(count: usize) -> GenerateConfig {
    let mut field_mapping = FieldMapping::new();
    field_mapping.set("Front", "Word");
    field_mapping.set("Back", "Reading");
    GenerateConfig {
        source_deck: "Japanese".to_string(),
        dest_deck: "Japanese::Review".to_string(),
        source_model: "Vocab".to_string(),
        dest_model: "Review".to_string(),
        count,
        field_mapping,
    }
}

fn note_info(id: i64, word: &str, reading: &str, tags: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "noteId": id,
        "modelName": "Vocab",
        "tags": tags,
        "fields": {
            "Word": {"value": word, "order": 0},
            "Reading": {"value": reading, "order": 1}
        }
    })
}

async fn mount_model_mocks(server: &wiremock::MockServer) {
    mock_action(
        server,
        "modelNames",
        mock_anki_response(vec!["Vocab", "Review", "Basic"]),
    )
    .await;
    mock_action(
        server,
        "modelFieldNames",
        mock_anki_response(vec!["Front", "Back"]),
    )
    .await;
}

#[tokio::test]
async fn test_generate_two_of_five_matches() {
    let server = setup_mock_server().await;
    mount_model_mocks(&server).await;

    // Five mature matches; the run samples two of them.
    mock_action(
        &server,
        "findCards",
        mock_anki_response(vec![11_i64, 12, 13, 14, 15]),
    )
    .await;

    mock_action(
        &server,
        "notesInfo",
        mock_anki_response(vec![
            note_info(101, "食べる", "たべる", &["jlpt-n5", "verb"]),
            note_info(102, "飲む", "のむ", &["jlpt-n5"]),
        ]),
    )
    .await;

    // Each created note lands in the destination deck/model with the
    // mapped fields and the source note's tags, verbatim.
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "addNote",
            "params": {"note": {
                "deckName": "Japanese::Review",
                "modelName": "Review",
                "fields": {"Front": "食べる", "Back": "たべる"},
                "tags": ["jlpt-n5", "verb"]
            }}
        })))
        .respond_with(mock_anki_response(201_i64))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "addNote",
            "params": {"note": {
                "deckName": "Japanese::Review",
                "modelName": "Review",
                "fields": {"Front": "飲む", "Back": "のむ"},
                "tags": ["jlpt-n5"]
            }}
        })))
        .respond_with(mock_anki_response(202_i64))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for_mock(&server);
    let mut rng = StdRng::seed_from_u64(1);
    let report = engine
        .generate()
        .run_with_rng(&vocab_to_review_config(2), &mut rng)
        .await
        .unwrap();

    assert_eq!(report.matched, 5);
    assert_eq!(report.sampled, 2);
    assert_eq!(report.created, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.attempts.len(), 2);
    assert!(report.attempts.iter().all(|a| a.outcome.is_ok()));
}

#[tokio::test]
async fn test_generate_uses_all_matches_when_count_exceeds_them() {
    let server = setup_mock_server().await;
    mount_model_mocks(&server).await;

    mock_action(&server, "findCards", mock_anki_response(vec![1_i64, 2, 3])).await;
    mock_action(
        &server,
        "notesInfo",
        mock_anki_response(vec![
            note_info(101, "a", "b", &[]),
            note_info(102, "c", "d", &[]),
            note_info(103, "e", "f", &[]),
        ]),
    )
    .await;
    mock_action_times(&server, "addNote", mock_anki_response(201_i64), 3).await;

    let engine = engine_for_mock(&server);
    let mut rng = StdRng::seed_from_u64(2);
    let report = engine
        .generate()
        .run_with_rng(&vocab_to_review_config(10), &mut rng)
        .await
        .unwrap();

    assert_eq!(report.matched, 3);
    assert_eq!(report.sampled, 3);
    assert_eq!(report.created, 3);
}

#[tokio::test]
async fn test_generate_partial_failure_is_isolated() {
    let server = setup_mock_server().await;
    mount_model_mocks(&server).await;

    mock_action(&server, "findCards", mock_anki_response(vec![1_i64, 2, 3])).await;
    mock_action(
        &server,
        "notesInfo",
        mock_anki_response(vec![
            note_info(101, "first", "x", &[]),
            note_info(102, "second", "y", &[]),
            note_info(103, "third", "z", &[]),
        ]),
    )
    .await;

    // The middle note is a duplicate; the other two go through.
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "addNote",
            "params": {"note": {"fields": {"Front": "second"}}}
        })))
        .respond_with(mock_anki_error("cannot create note because it is a duplicate"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"action": "addNote"})))
        .respond_with(mock_anki_response(201_i64))
        .expect(2)
        .mount(&server)
        .await;

    let engine = engine_for_mock(&server);
    let mut rng = StdRng::seed_from_u64(3);
    let report = engine
        .generate()
        .run_with_rng(&vocab_to_review_config(3), &mut rng)
        .await
        .unwrap();

    assert_eq!(report.sampled, 3);
    assert_eq!(report.created, 2);
    assert_eq!(report.failed, 1);
    // One attempt recorded per sampled note, in order.
    assert_eq!(report.attempts.len(), 3);
    let failed: Vec<i64> = report
        .attempts
        .iter()
        .filter(|a| a.outcome.is_err())
        .map(|a| a.source_note_id)
        .collect();
    assert_eq!(failed, vec![102]);
    assert!(
        report.attempts[1]
            .outcome
            .as_ref()
            .unwrap_err()
            .contains("duplicate")
    );
}

#[tokio::test]
async fn test_generate_empty_search_stops_run() {
    let server = setup_mock_server().await;
    mount_model_mocks(&server).await;

    mock_action(&server, "findCards", mock_anki_response(Vec::<i64>::new())).await;
    // Neither the note fetch nor any creation may happen.
    mock_action_times(&server, "notesInfo", mock_anki_response(()), 0).await;
    mock_action_times(&server, "addNote", mock_anki_response(()), 0).await;

    let engine = engine_for_mock(&server);
    let err = engine
        .generate()
        .run(&vocab_to_review_config(2))
        .await
        .unwrap_err();

    match err {
        Error::NoCardsFound(query) => {
            assert!(query.contains("deck:\"Japanese\""));
            assert!(query.contains("note:\"Vocab\""));
            assert!(query.contains("prop:ivl>=21"));
        }
        other => panic!("expected NoCardsFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_empty_mapping_aborts_before_any_remote_call() {
    // No mocks mounted: any request would fail the test.
    let server = setup_mock_server().await;

    let mut config = vocab_to_review_config(2);
    config.field_mapping = FieldMapping::new();

    let engine = engine_for_mock(&server);
    let err = engine.generate().run(&config).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_generate_rejects_zero_count() {
    let server = setup_mock_server().await;

    let engine = engine_for_mock(&server);
    let err = engine
        .generate()
        .run(&vocab_to_review_config(0))
        .await
        .unwrap_err();

    match err {
        Error::Validation(msg) => assert!(msg.contains("positive")),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_rejects_unknown_model() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "modelNames",
        mock_anki_response(vec!["Basic"]),
    )
    .await;

    let engine = engine_for_mock(&server);
    let err = engine
        .generate()
        .run(&vocab_to_review_config(2))
        .await
        .unwrap_err();

    match err {
        Error::ModelNotFound(name) => assert_eq!(name, "Vocab"),
        other => panic!("expected ModelNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_rejects_mapping_outside_destination_fields() {
    let server = setup_mock_server().await;
    mount_model_mocks(&server).await;

    let mut config = vocab_to_review_config(2);
    config.field_mapping.set("Bogus", "Word");

    let engine = engine_for_mock(&server);
    let err = engine.generate().run(&config).await.unwrap_err();

    match err {
        Error::MissingField { model, field } => {
            assert_eq!(model, "Review");
            assert_eq!(field, "Bogus");
        }
        other => panic!("expected MissingField, got {:?}", other),
    }
}

#[tokio::test]
async fn test_preview_reports_matches_without_creating() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "modelNames",
        mock_anki_response(vec!["Vocab", "Review"]),
    )
    .await;
    // Field lookups for source, then destination.
    mock_action_times(
        &server,
        "modelFieldNames",
        mock_anki_response(vec!["Word", "Reading"]),
        2,
    )
    .await;
    mock_action(&server, "findCards", mock_anki_response(vec![1_i64, 2, 3, 4])).await;
    mock_action_times(&server, "addNote", mock_anki_response(()), 0).await;

    let mut config = vocab_to_review_config(2);
    config.field_mapping = FieldMapping::new();
    config.field_mapping.set("Word", "Word");
    config.field_mapping.set("Reading", "Missing");

    let engine = engine_for_mock(&server);
    let preview = engine.generate().preview(&config).await.unwrap();

    assert!(preview.source_model_exists);
    assert!(preview.dest_model_exists);
    assert_eq!(preview.matched, 4);
    assert_eq!(preview.mapping_issues.len(), 1);
    assert!(preview.mapping_issues[0].contains("Missing"));
}
