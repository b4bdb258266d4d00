//! HTTP-level tests for the Twilio client against a mock server.

use twilio_voice::{CallMode, CallPlacer, OutboundCall, TwilioClient, VoiceConfig, VoiceError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> VoiceConfig {
    VoiceConfig::new(
        "AC123",
        "secret",
        "+15005550006",
        "https://alerts.example.com",
    )
    .with_api_base_url(server.uri())
}

#[tokio::test]
async fn place_call_returns_sid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(body_string_contains("To=%2B2348100000001"))
        .and(body_string_contains("From=%2B15005550006"))
        .and(body_string_contains("StatusCallbackMethod=POST"))
        .and(body_string_contains("StatusCallbackEvent=initiated"))
        .and(body_string_contains("StatusCallbackEvent=completed"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "CA42",
            "status": "queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwilioClient::new(test_config(&server)).unwrap();
    let call = OutboundCall::direct("+2348100000001", "New signal from FX Room: BUY EURUSD now");

    let sid = client.place_call(&call).await.unwrap();
    assert_eq!(sid, "CA42");
}

#[tokio::test]
async fn place_call_carries_retry_context_in_callback_url() {
    let server = MockServer::start().await;

    // The form-encoded StatusCallback value holds the callback URL with its
    // own query string, so the context appears doubly encoded in the body.
    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(body_string_contains("retry_count%3D2"))
        .and(body_string_contains("number%3D%252B2348100000001"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "CA43"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwilioClient::new(test_config(&server)).unwrap();
    let call = OutboundCall::direct("+2348100000001", "BUY").with_retry_count(2);

    client.place_call(&call).await.unwrap();
}

#[tokio::test]
async fn place_call_sip_addressing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(body_string_contains(
            "To=sip%3A%2B2348100000001%40sip.example.com",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "CA44"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server).with_sip_domain("sip.example.com");
    let client = TwilioClient::new(config).unwrap();
    let call = OutboundCall::direct("+2348100000001", "BUY");

    client.place_call(&call).await.unwrap();
}

#[tokio::test]
async fn place_call_rejection_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid To number"))
        .mount(&server)
        .await;

    let client = TwilioClient::new(test_config(&server)).unwrap();
    let call = OutboundCall::direct("not-a-number", "BUY");

    let err = client.place_call(&call).await.unwrap_err();
    match err {
        VoiceError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid To number"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn broadcast_isolates_failures_per_number() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(body_string_contains("To=%2B1000000000001"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "CA1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(body_string_contains("To=%2B1000000000002"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
        .mount(&server)
        .await;

    let client = TwilioClient::new(test_config(&server)).unwrap();
    let phones = vec![
        "+1000000000001".to_string(),
        "+1000000000002".to_string(),
    ];

    let results = client
        .broadcast(&phones, "BUY EURUSD now", &CallMode::Direct)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results["+1000000000001"].as_deref().unwrap(), "CA1");
    assert!(results["+1000000000002"].is_err());
}

#[tokio::test]
async fn broadcast_conference_mode_dials_the_room() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(body_string_contains("Conference"))
        .and(body_string_contains("conference_room%3DFX%2520Room"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "CA9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwilioClient::new(test_config(&server)).unwrap();
    let phones = vec!["+1000000000001".to_string()];
    let mode = CallMode::Conference {
        room: "FX Room".to_string(),
    };

    let results = client.broadcast(&phones, "BUY", &mode).await;
    assert!(results["+1000000000001"].is_ok());
}
