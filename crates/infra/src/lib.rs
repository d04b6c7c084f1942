//! # MailBridge インフラ層
//!
//! 配信プロバイダとの通信と、メッセージ送信アダプタを担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層の変換ロジックを使ってメッセージをペイロードに変換し、
//! 外部のトランザクションメール API へ送信する。外部システムの詳細をカプセル化し、
//! ドメイン層を HTTP クライアントの変更から保護する。
//!
//! ## 責務
//!
//! - **プロバイダクライアント**: Elastic Email v4 API の呼び出し
//! - **トランスポート**: 送信前後のイベント通知と送信結果の報告
//! - **設定**: プロバイダ接続設定の読み込み
//!
//! ## 依存関係
//!
//! ```text
//! infra → domain
//!   ↘
//!   shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - プロバイダ接続設定
//! - [`error`] - インフラ層エラー定義
//! - [`provider`] - トランザクションメール API クライアント
//! - [`transport`] - メール送信トランスポート
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use mailbridge_domain::{event::ListenerDispatcher, message::{Address, Message}};
//! use mailbridge_infra::{ElasticEmailClient, ElasticEmailTransport, MailTransport};
//!
//! async fn send() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ElasticEmailClient::from_env()?;
//!     let transport = ElasticEmailTransport::new(
//!         Arc::new(ListenerDispatcher::new()),
//!         Arc::new(client),
//!     );
//!
//!     let message = Message::new()
//!         .from(Address::new("noreply@example.com"))
//!         .to(Address::with_name("user@example.com", "User"))
//!         .subject("Hello")
//!         .body("World");
//!
//!     let outcome = transport.send(&message).await?;
//!     println!("accepted: {}", outcome.accepted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod provider;
pub mod transport;

pub use config::ElasticEmailConfig;
pub use error::{InfraError, InfraErrorKind};
pub use provider::{
    ElasticEmailClient,
    NoopTransactionalEmailApi,
    TransactionalEmailApi,
    TransactionalReceipt,
};
pub use transport::{ElasticEmailTransport, MailTransport, SendOutcome, SendStatus};
