//! Answer endpoint contract tests
//!
//! Pin the wire contract against a local mock server: the body is the raw
//! base64 text, a success answer carries both required fields, and error
//! bodies surface their message.

use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voice_ask::application::ports::{AnswerClient, TransportError};
use voice_ask::infrastructure::HttpAnswerClient;

#[tokio::test]
async fn posts_raw_base64_body_and_parses_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_string("QUJDRA=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transcript": "Turn on Wi-Fi by opening Settings.",
            "audioUrl": "https://cdn.example/resp1.mp3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(format!("{}/ask", server.uri()));
    let answer = client.send("QUJDRA==").await.unwrap();

    assert_eq!(answer.transcript(), "Turn on Wi-Fi by opening Settings.");
    assert_eq!(answer.audio_url(), "https://cdn.example/resp1.mp3");
}

#[tokio::test]
async fn error_body_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "upstream failure"})),
        )
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(server.uri());
    let err = client.send("QUJDRA==").await.unwrap_err();

    match &err {
        TransportError::RemoteError(message) => assert_eq!(message, "upstream failure"),
        other => panic!("expected RemoteError, got {:?}", other),
    }
    assert_eq!(err.to_string(), "upstream failure");
}

#[tokio::test]
async fn message_field_is_used_when_error_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "audio too short"})),
        )
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(server.uri());
    let err = client.send("QUJDRA==").await.unwrap_err();

    assert!(matches!(
        err,
        TransportError::RemoteError(ref m) if m == "audio too short"
    ));
}

#[tokio::test]
async fn plain_error_body_falls_back_to_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(server.uri());
    let err = client.send("QUJDRA==").await.unwrap_err();

    match err {
        TransportError::RemoteError(message) => {
            assert!(message.contains("503"), "got: {}", message);
        }
        other => panic!("expected RemoteError, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_audio_url_is_invalid_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"transcript": "hello there"})),
        )
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(server.uri());
    let err = client.send("QUJDRA==").await.unwrap_err();

    match err {
        TransportError::InvalidResponseShape(detail) => {
            assert!(detail.contains("audioUrl"), "got: {}", detail);
        }
        other => panic!("expected InvalidResponseShape, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_transcript_is_invalid_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"audioUrl": "https://cdn.example/resp1.mp3"})),
        )
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(server.uri());
    let err = client.send("QUJDRA==").await.unwrap_err();

    assert!(matches!(err, TransportError::InvalidResponseShape(_)));
}

#[tokio::test]
async fn non_json_success_body_is_invalid_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = HttpAnswerClient::new(server.uri());
    let err = client.send("QUJDRA==").await.unwrap_err();

    assert!(matches!(err, TransportError::InvalidResponseShape(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    // Grab a port that nothing is listening on anymore.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpAnswerClient::new(uri);
    let err = client.send("QUJDRA==").await.unwrap_err();

    assert!(matches!(err, TransportError::NetworkError(_)));
}
