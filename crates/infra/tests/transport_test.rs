//! ElasticEmailTransport の統合テスト
//!
//! 実クライアントとフェイクサーバーを組み合わせ、送信結果と送信イベントを検証する。

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::FakeElasticEmail;
use mailbridge_domain::{
    MailError,
    event::{ListenerDispatcher, SendPhase, SendResult},
    message::{Address, Message},
};
use mailbridge_infra::{
    ElasticEmailTransport,
    MailTransport,
    SendOutcome,
    SendStatus,
    mock::RecordingListener,
};
use pretty_assertions::assert_eq;

fn transport_for(server: &FakeElasticEmail, listener: &RecordingListener) -> ElasticEmailTransport {
    let transport = ElasticEmailTransport::new(
        Arc::new(ListenerDispatcher::new()),
        Arc::new(server.client()),
    );
    transport.register_plugin(Arc::new(listener.clone()));
    transport
}

fn message() -> Message {
    Message::new()
        .from(Address::new("noreply@example.com"))
        .to(Address::with_name("a@example.com", "Ann"))
        .to(Address::new("b@example.com"))
        .to(Address::new("c@example.com"))
        .subject("お知らせ")
        .body("本文")
}

#[tokio::test]
async fn test_プロバイダが受け付けるとto宛先数を返す() {
    let server = FakeElasticEmail::accepting().await;
    let listener = RecordingListener::new();
    let transport = transport_for(&server, &listener);

    let outcome = transport.send(&message()).await.unwrap();

    assert_eq!(outcome, SendOutcome::succeeded(3));
    assert_eq!(server.received().len(), 1);
    let observed = listener.observed();
    assert_eq!(observed.len(), 2);
    assert_eq!(observed[1].phase, SendPhase::SendPerformed);
    assert_eq!(observed[1].result, SendResult::Success);
}

#[tokio::test]
async fn test_プロバイダがエラーを返しても送信は正常に戻り失敗宛先を報告する() {
    let server = FakeElasticEmail::start(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let listener = RecordingListener::new();
    let transport = transport_for(&server, &listener);

    let outcome = transport.send(&message()).await.unwrap();

    assert_eq!(outcome.status, SendStatus::Failed);
    assert_eq!(outcome.accepted, 0);
    assert_eq!(
        outcome.failed_recipients,
        vec!["Ann <a@example.com>", "b@example.com", "c@example.com"]
    );
    let after = listener.observed().pop().unwrap();
    assert_eq!(after.result, SendResult::Failed);
    assert_eq!(after.failed_recipients, outcome.failed_recipients);
}

#[tokio::test]
async fn test_宛先なしの場合はリクエストを送らない() {
    let server = FakeElasticEmail::accepting().await;
    let listener = RecordingListener::new();
    let transport = transport_for(&server, &listener);

    let result = transport
        .send(&Message::new().from(Address::new("noreply@example.com")))
        .await;

    assert_eq!(result, Err(MailError::missing_recipient()));
    assert!(server.received().is_empty());
}

#[tokio::test]
async fn test_キャンセルされた送信はリクエストを送らない() {
    let server = FakeElasticEmail::accepting().await;
    let listener = RecordingListener::cancelling();
    let transport = transport_for(&server, &listener);

    let outcome = transport.send(&message()).await.unwrap();

    assert_eq!(outcome, SendOutcome::cancelled());
    assert!(server.received().is_empty());
}
