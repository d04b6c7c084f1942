//! # MailBridge ドメイン層
//!
//! メール送信アダプタの中核を担うモデルと変換ロジックを定義する。
//!
//! ## 設計方針
//!
//! このクレートは I/O を一切持たない純粋なロジックのみを提供する:
//!
//! - **メッセージモデル**: 呼び出し元が組み立てるメール（宛先、本文、添付、ヘッダ）
//! - **送信ペイロード**: トランザクションメール API に渡すリクエスト形状
//! - **変換**: メッセージ → ペイロードの純粋関数群
//! - **送信イベント**: 送信前後に通知されるオブザーバーの仕組み
//! - **ドメインエラー**: 送信前提条件の違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! infra → domain
//!   ↘
//!   shared
//! ```
//!
//! ドメイン層はインフラ層（HTTP クライアント）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`message`] - 送信対象メッセージのモデル
//! - [`payload`] - プロバイダ向け送信ペイロード
//! - [`translate`] - メッセージからペイロードへの変換
//! - [`event`] - 送信イベントとリスナー
//! - [`error`] - ドメイン層エラー定義
//!
//! ## 使用例
//!
//! ```rust
//! use mailbridge_domain::{
//!     message::{Address, Message},
//!     translate::build_payload,
//! };
//!
//! let message = Message::new()
//!     .from(Address::with_name("noreply@example.com", "Example"))
//!     .to(Address::new("user@example.com"))
//!     .subject("こんにちは")
//!     .content_type("text/html")
//!     .body("<p>本文</p>");
//!
//! let payload = build_payload(&message);
//! assert_eq!(payload.content.from, "Example <noreply@example.com>");
//! assert_eq!(payload.to_addresses(), ["user@example.com"]);
//! ```

pub mod error;
pub mod event;
pub mod message;
pub mod payload;
pub mod translate;

pub use error::MailError;
