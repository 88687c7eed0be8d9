use copydesk::{ChatRole, CompletionClient, CompletionRequest, Message, PipelineError};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn client_for(server: &MockServer, api_key: Option<&str>) -> CompletionClient {
    CompletionClient::new(
        api_key.map(str::to_string),
        format!("{}/v1", server.uri()),
    )
    .expect("client")
}

fn sample_request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4".to_string(),
        messages: vec![
            Message {
                role: ChatRole::System,
                content: "You are a helpful assistant.".to_string(),
            },
            Message {
                role: ChatRole::User,
                content: "Write the copy.".to_string(),
            },
        ],
    }
}

fn echo_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "content": text } }]
    }))
}

#[tokio::test]
async fn echo_round_trip_returns_content_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(echo_response("X"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("test-key"));
    let result = client.complete(&sample_request()).await.expect("completion");
    assert_eq!(result.text, "X");

    let requests = server
        .received_requests()
        .await
        .expect("mock server should record requests");
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["model"], "gpt-4");
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
}

#[tokio::test]
async fn provider_error_payload_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "message": "model overloaded", "type": "server_error" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("test-key"));
    let err = client
        .complete(&sample_request())
        .await
        .expect_err("error payload should be surfaced");

    match err {
        PipelineError::Provider {
            message, status, ..
        } => {
            assert_eq!(message, "model overloaded");
            assert_eq!(status, None);
        }
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_content_keeps_full_body_for_diagnostics() {
    let server = MockServer::start().await;
    let drifted = json!({ "choices": [{ "message": { "reasoning": "hm" } }], "id": "resp_1" });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(drifted.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("test-key"));
    let err = client
        .complete(&sample_request())
        .await
        .expect_err("drifted shape should fail");

    match err {
        PipelineError::EmptyResponse { raw } => assert_eq!(raw, drifted),
        other => panic!("expected EmptyResponse error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_rejection_captures_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("bad-key"));
    let err = client
        .complete(&sample_request())
        .await
        .expect_err("401 should fail");

    match err {
        PipelineError::Provider {
            status, body, ..
        } => {
            assert_eq!(status, Some(401));
            assert_eq!(body.as_deref(), Some("Incorrect API key provided"));
        }
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_fails_before_any_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(echo_response("should never be reached"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client
        .complete(&sample_request())
        .await
        .expect_err("missing key should fail");
    assert!(matches!(err, PipelineError::Configuration(_)));

    let requests = server
        .received_requests()
        .await
        .expect("mock server should record requests");
    assert!(requests.is_empty());
}
