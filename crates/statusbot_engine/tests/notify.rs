use serde_json::json;
use statusbot_engine::{DeliveryError, Notifier, TelegramNotifier};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn deliver_posts_send_message_with_chat_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .and(body_json(json!({ "chat_id": "42", "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_base(server.uri(), "TEST", "42");
    notifier.deliver("hello").await.expect("delivered");
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botBAD/sendMessage"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_base(server.uri(), "BAD", "42");
    let err = notifier.deliver("hello").await.unwrap_err();
    assert_eq!(err, DeliveryError::Unauthorized);
}

#[tokio::test]
async fn bad_request_status_maps_to_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_base(server.uri(), "TEST", "no-such-chat");
    let err = notifier.deliver("hello").await.unwrap_err();
    assert_eq!(err, DeliveryError::BadRequest);
}

#[tokio::test]
async fn server_errors_map_to_other() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_api_base(server.uri(), "TEST", "42");
    let err = notifier.deliver("hello").await.unwrap_err();
    assert!(matches!(err, DeliveryError::Other(_)));
}
