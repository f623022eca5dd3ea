use super::*;
use matdev_core::message::{MessageKey, STATUS_BROADCAST_JID};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn channel(base_url: &str, api_key: &str) -> BridgeChannel {
    BridgeChannel::new(BridgeConfig {
        enabled: true,
        base_url: base_url.to_string(),
        api_key: api_key.to_string(),
    })
}

fn status_reaction() -> OutgoingReaction {
    OutgoingReaction {
        target: STATUS_BROADCAST_JID.into(),
        emoji: "\u{1f622}".into(),
        key: MessageKey {
            id: "3EB0A1".into(),
            remote_jid: STATUS_BROADCAST_JID.into(),
            participant: Some("5511999887766@s.whatsapp.net".into()),
            from_me: false,
        },
    }
}

#[test]
fn test_react_body_wire_format() {
    let reaction = status_reaction();
    let json = serde_json::to_value(ReactBody::from(&reaction)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "chatJid": "status@broadcast",
            "messageId": "3EB0A1",
            "participant": "5511999887766@s.whatsapp.net",
            "fromMe": false,
            "emoji": "\u{1f622}",
        })
    );
}

#[test]
fn test_trailing_slash_trimmed() {
    let ch = channel("http://127.0.0.1:3000/", "");
    assert_eq!(ch.base_url, "http://127.0.0.1:3000");
}

#[tokio::test]
async fn test_send_reaction_posts_to_react() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/react"))
        .and(header("authorization", "Bearer s3cret"))
        .and(body_json(serde_json::json!({
            "chatJid": "status@broadcast",
            "messageId": "3EB0A1",
            "participant": "5511999887766@s.whatsapp.net",
            "fromMe": false,
            "emoji": "\u{1f622}",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ch = channel(&server.uri(), "s3cret");
    ch.send_reaction(status_reaction()).await.unwrap();
}

#[tokio::test]
async fn test_send_posts_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(body_json(serde_json::json!({"to": "bob@s.whatsapp.net", "text": "hi"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ch = channel(&server.uri(), "");
    ch.send(OutgoingMessage {
        text: "hi".into(),
        reply_target: Some("bob@s.whatsapp.net".into()),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_non_success_status_is_channel_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/react"))
        .respond_with(ResponseTemplate::new(502).set_body_string("not connected"))
        .mount(&server)
        .await;

    let ch = channel(&server.uri(), "");
    let err = ch.send_reaction(status_reaction()).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("502"), "got: {msg}");
    assert!(msg.contains("not connected"), "got: {msg}");
}

#[tokio::test]
async fn test_slow_bridge_times_out_replies_but_not_reactions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(600)))
        .mount(&server)
        .await;

    let ch = channel(&server.uri(), "").with_send_timeout(Duration::from_millis(150));

    let reply = OutgoingMessage {
        text: "hi".into(),
        reply_target: Some("5511999887766@s.whatsapp.net".into()),
    };
    assert!(ch.send(reply).await.is_err());

    ch.send_reaction(status_reaction()).await.unwrap();
}

#[tokio::test]
async fn test_send_without_target_fails() {
    let ch = channel("http://127.0.0.1:9", "");
    let result = ch
        .send(OutgoingMessage {
            text: "hi".into(),
            reply_target: None,
        })
        .await;
    assert!(matches!(result, Err(MatdevError::Channel(_))));
}

#[tokio::test]
async fn test_inbound_queue_lifecycle() {
    let ch = channel("http://127.0.0.1:9", "");
    assert!(ch.inbound().await.is_none());

    let mut rx = ch.start().await.unwrap();
    let tx = ch.inbound().await.unwrap();
    tx.send(IncomingMessage {
        id: "A1".into(),
        channel: "bridge".into(),
        sender_id: "bob".into(),
        sender_name: None,
        text: "lol".into(),
        timestamp: chrono::Utc::now(),
        reply_target: None,
        is_group: false,
        from_me: false,
        kind: Default::default(),
    })
    .await
    .unwrap();
    assert_eq!(rx.recv().await.unwrap().id, "A1");

    ch.stop().await.unwrap();
    assert!(ch.inbound().await.is_none());
}
