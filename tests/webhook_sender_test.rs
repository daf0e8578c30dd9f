use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sakura_iot::error::SendError;
use sakura_iot::utils::signature;
use sakura_iot::{Payload, SenderConfig, WebhookSender, SIGNATURE_HEADER};

fn test_payload() -> Payload {
    let mut p = Payload::new("module-1");
    p.add_int(0, 42);
    p.add_hex_string(1, "0f1e2d3c4b5c6b7a");
    p
}

fn sender_for(server: &MockServer, secret: Option<&str>) -> WebhookSender {
    WebhookSender::with_config(
        "token-1",
        secret.map(str::to_string),
        SenderConfig {
            endpoint_root: server.uri(),
            ..SenderConfig::default()
        },
    )
}

#[tokio::test]
async fn send_posts_json_to_token_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token-1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sender = sender_for(&server, None);
    sender.send(&test_payload()).await.unwrap();
}

#[tokio::test]
async fn send_signs_exact_request_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token-1"))
        .and(header_exists(SIGNATURE_HEADER))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sender = sender_for(&server, Some("opaque-secret"));
    sender.send(&test_payload()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let claimed = request.headers[SIGNATURE_HEADER].to_str().unwrap();

    // The signature verifies against the body bytes as received.
    assert!(signature::verify(b"opaque-secret", claimed, &request.body));

    // And the body decodes back into the same envelope shape.
    let decoded: Payload = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(decoded.module, "module-1");
    assert_eq!(decoded.payload.channels.len(), 2);
}

#[tokio::test]
async fn unsigned_send_omits_signature_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let sender = sender_for(&server, None);
    sender.send(&test_payload()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key(SIGNATURE_HEADER));
}

#[tokio::test]
async fn remote_error_embeds_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let sender = sender_for(&server, None);
    let err = sender.send(&test_payload()).await.unwrap_err();

    match &err {
        SendError::Remote { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected SendError::Remote, got {other:?}"),
    }
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn non_200_success_statuses_are_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    // The platform contract is exactly 200; anything else is a failure.
    let sender = sender_for(&server, None);
    let err = sender.send(&test_payload()).await.unwrap_err();
    assert!(matches!(err, SendError::Remote { .. }));
}

#[tokio::test]
async fn transport_failure_surfaces_as_error() {
    let sender = WebhookSender::with_config(
        "token-1",
        None,
        SenderConfig {
            // Nothing listens here.
            endpoint_root: "http://127.0.0.1:9".to_string(),
            ..SenderConfig::default()
        },
    );

    let err = sender.send(&test_payload()).await.unwrap_err();
    assert!(matches!(err, SendError::Transport(_)));
}
