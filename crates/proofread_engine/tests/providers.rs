use std::time::Duration;

use pretty_assertions::assert_eq;
use proofread_engine::{
    FailureKind, GeminiProvider, OpenAiProvider, ProviderKind, ProviderSettings, TextGenerator,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn gemini_settings(server: &MockServer) -> ProviderSettings {
    ProviderSettings {
        base_url: server.uri(),
        ..ProviderSettings::gemini()
    }
}

fn openai_settings(server: &MockServer) -> ProviderSettings {
    ProviderSettings {
        base_url: format!("{}/v1", server.uri()),
        ..ProviderSettings::openai()
    }
}

#[tokio::test]
async fn gemini_sends_prompt_and_extracts_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", "gemini-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Fix this."}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "**Good.**"}], "role": "model"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("gemini-key".to_string(), gemini_settings(&server)).unwrap();
    assert_eq!(provider.kind(), ProviderKind::Gemini);
    assert_eq!(provider.model(), "gemini-2.5-flash");

    let text = provider.generate("Fix this.").await.expect("generate ok");
    assert_eq!(text, "**Good.**");
}

#[tokio::test]
async fn gemini_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(r#"{"error":{"message":"API key not valid"}}"#),
        )
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("bad".to_string(), gemini_settings(&server)).unwrap();
    let err = provider.generate("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(403));
    assert!(err.message.contains("API key not valid"));
}

#[tokio::test]
async fn gemini_rejects_malformed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("key".to_string(), gemini_settings(&server)).unwrap();
    let err = provider.generate("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn gemini_blocked_prompt_is_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("key".to_string(), gemini_settings(&server)).unwrap();
    let text = provider.generate("x").await.expect("empty reply is not an error");
    assert_eq!(text, "");
}

#[tokio::test]
async fn gemini_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let settings = ProviderSettings {
        request_timeout: Duration::from_millis(50),
        ..gemini_settings(&server)
    };
    let provider = GeminiProvider::new("key".to_string(), settings).unwrap();
    let err = provider.generate("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn openai_sends_single_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer openai-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Fix this."}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "## Fixed"}, "finish_reason": "stop"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("openai-key".to_string(), openai_settings(&server)).unwrap();
    let text = provider.generate("Fix this.").await.expect("generate ok");
    assert_eq!(text, "## Fixed");
}

#[tokio::test]
async fn openai_requires_choices_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "error"})))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("key".to_string(), openai_settings(&server)).unwrap();
    let err = provider.generate("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn oversized_reply_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let settings = ProviderSettings {
        max_response_bytes: 16,
        ..openai_settings(&server)
    };
    let provider = OpenAiProvider::new("key".to_string(), settings).unwrap();
    let err = provider.generate("x").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            actual: 64
        }
    );
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let settings = ProviderSettings {
        // Port 9 (discard) is closed on test machines.
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..ProviderSettings::openai()
    };
    let provider = OpenAiProvider::new("key".to_string(), settings).unwrap();
    let err = provider.generate("x").await.unwrap_err();
    assert!(
        matches!(err.kind, FailureKind::Network | FailureKind::Timeout),
        "unexpected kind {:?}",
        err.kind
    );
}

#[test]
fn empty_credentials_fail_at_construction() {
    let err = GeminiProvider::new(String::new(), ProviderSettings::gemini())
        .err()
        .expect("missing key rejected");
    assert_eq!(
        err.kind,
        FailureKind::MissingCredential {
            provider: ProviderKind::Gemini
        }
    );
    assert!(OpenAiProvider::new(" ".to_string(), ProviderSettings::openai()).is_err());
}
