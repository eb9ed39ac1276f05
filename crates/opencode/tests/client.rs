//! HTTP client behavior against a mock OpenCode server.

use opencode::{Error, Event, OpencodeClient, Role, SessionApi};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> OpencodeClient {
    OpencodeClient::builder(server.uri()).build().unwrap()
}

#[tokio::test]
async fn fetches_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/ses_child"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ses_child",
            "parentID": "ses_root",
            "title": "explore the repo",
            "time": { "created": 1, "updated": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client(&server).session("ses_child").await.unwrap();
    assert_eq!(session.id, "ses_child");
    assert!(session.is_subagent());
}

#[tokio::test]
async fn fetches_messages_with_directory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/ses_1/message"))
        .and(query_param("directory", "/work/app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "info": { "role": "user" }, "parts": [{ "type": "text", "text": "hi" }] },
            { "info": { "role": "assistant" }, "parts": [
                { "type": "reasoning", "text": "thinking" },
                { "type": "text", "text": "Hello!" }
            ] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpencodeClient::builder(server.uri())
        .directory("/work/app")
        .build()
        .unwrap();
    let messages = client.messages("ses_1").await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].info.role, Role::User);
    assert_eq!(messages[1].last_text(), Some("Hello!"));
}

#[tokio::test]
async fn not_found_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("session not found"))
        .mount(&server)
        .await;

    let err = client(&server).session("missing").await.unwrap_err();
    match err {
        Error::Api { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "session not found");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn null_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/ses_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
        .mount(&server)
        .await;

    let err = client(&server).session("ses_1").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = OpencodeClient::builder(format!("http://127.0.0.1:{port}"))
        .build()
        .unwrap();
    let err = client.session("ses_1").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn event_stream_decodes_events_in_order() {
    let server = MockServer::start().await;
    let body = concat!(
        "data: {\"type\":\"server.connected\",\"properties\":{}}\n\n",
        ": heartbeat\n\n",
        "data: not json\n\n",
        "data: {\"type\":\"session.idle\",\"properties\":{\"sessionID\":\"ses_1\"}}\n\n",
        "data: {\"type\":\"session.idle\",\"properties\":{\"sessionID\":\"ses_2\"}}",
    );
    Mock::given(method("GET"))
        .and(path("/event"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let mut events = client(&server).events().await.unwrap();
    let mut received = Vec::new();
    while let Some(event) = events.next_event().await.unwrap() {
        received.push(event);
    }

    assert_eq!(
        received,
        vec![
            Event::Unrecognized,
            Event::session_idle("ses_1"),
            Event::session_idle("ses_2"),
        ]
    );
}

#[tokio::test]
async fn event_stream_rejects_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(matches!(
        client(&server).events().await,
        Err(Error::Api { .. })
    ));
}
