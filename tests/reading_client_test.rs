use anyhow::Result;
use httpmock::prelude::*;
use mystic_tarot::core::catalog::all_cards;
use mystic_tarot::core::reader::DrawOutcome;
use mystic_tarot::core::session::{SessionState, CONNECTION_LOST};
use mystic_tarot::domain::model::ReadingRequest;
use mystic_tarot::domain::ports::ReadingService;
use mystic_tarot::{ProxyClient, TarotError, TarotReader};

#[tokio::test]
async fn test_client_posts_request_and_returns_text() -> Result<()> {
    let server = MockServer::start();
    let proxy_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate-reading")
            .json_body(serde_json::json!({
                "cardName": "Page of Wands",
                "isReversed": false,
                "question": ""
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"text": "The Card's Essence A Your Reading B"}));
    });

    let client = ProxyClient::new(server.url("/api/generate-reading"));
    let text = client
        .request_reading(&ReadingRequest {
            card_name: "Page of Wands".to_string(),
            is_reversed: false,
            question: String::new(),
        })
        .await?;

    proxy_mock.assert();
    assert_eq!(text, "The Card's Essence A Your Reading B");
    Ok(())
}

#[tokio::test]
async fn test_client_surfaces_proxy_error() {
    let server = MockServer::start();
    let proxy_mock = server.mock(|when, then| {
        when.method(POST).path("/api/generate-reading");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"error": "Failed to get a reading from the AI."}));
    });

    let client = ProxyClient::new(server.url("/api/generate-reading"));
    let result = client
        .request_reading(&ReadingRequest {
            card_name: "The Lovers".to_string(),
            is_reversed: true,
            question: "us?".to_string(),
        })
        .await;

    proxy_mock.assert();
    match result {
        Err(TarotError::ProxyError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to get a reading from the AI.");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_client_rejects_unexpected_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/generate-reading");
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let client = ProxyClient::new(server.url("/api/generate-reading"));
    let result = client
        .request_reading(&ReadingRequest {
            card_name: "Justice".to_string(),
            is_reversed: false,
            question: String::new(),
        })
        .await;

    assert!(matches!(
        result,
        Err(TarotError::ProxyError { status: 502, .. })
    ));
}

#[tokio::test]
async fn test_reader_against_proxy_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let proxy_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate-reading")
            .body_contains("\"question\":\"Should I change jobs?\"");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "text": "The Card's Essence\nMovement.\n\nYour Reading\nGo."
            }));
    });

    let reader = TarotReader::with_seed(ProxyClient::new(server.url("/api/generate-reading")), 99);
    assert!(reader.set_question("Should I change jobs?").await);

    assert_eq!(reader.draw().await, DrawOutcome::Revealed);
    proxy_mock.assert();

    let session = reader.snapshot().await;
    let card = session.drawn_card().expect("card is shown with the result");
    assert!(all_cards().contains(&card.card));

    let sections = session.sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title.as_deref(), Some("The Card's Essence"));
    assert_eq!(sections[0].content, "Movement.");
    assert_eq!(sections[1].title.as_deref(), Some("Your Reading"));
    assert_eq!(sections[1].content, "Go.");

    // 結果畫面時不能再抽牌
    assert_eq!(reader.draw().await, DrawOutcome::Ignored);
    proxy_mock.assert_hits(1);

    reader.reset().await;
    let session = reader.snapshot().await;
    assert_eq!(session.state(), &SessionState::Idle { error: None });
    assert_eq!(session.question(), "");
    Ok(())
}

#[tokio::test]
async fn test_reader_failure_returns_to_idle() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/generate-reading");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"error": "Received an empty response from the AI."}));
    });

    let reader = TarotReader::with_seed(ProxyClient::new(server.url("/api/generate-reading")), 5);
    reader.set_question("health?").await;

    assert_eq!(
        reader.draw().await,
        DrawOutcome::Failed(CONNECTION_LOST.to_string())
    );

    let session = reader.snapshot().await;
    assert_eq!(session.error(), Some(CONNECTION_LOST));
    assert!(session.drawn_card().is_none());
    assert_eq!(session.question(), "health?");
}
