//! # 配信プロバイダ
//!
//! トランザクションメール API の呼び出しを担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `TransactionalEmailApi` trait で送信 API を抽象化
//! - **2 つの実装**: Elastic Email（本番用）、Noop（ログ出力のみ）
//! - **単一操作**: 成功かエラーのいずれか。部分成功は扱わない
//! - **リトライなし**: 再試行・レート制限はこの層の責務外

mod elastic_email;
mod noop;

use async_trait::async_trait;
pub use elastic_email::ElasticEmailClient;
use mailbridge_domain::payload::OutboundPayload;
pub use noop::NoopTransactionalEmailApi;
use serde::Deserialize;

use crate::error::InfraError;

/// トランザクション送信の受付結果
///
/// プロバイダのレスポンスから読み取る。欠けている項目は `None`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransactionalReceipt {
    /// トランザクション ID
    #[serde(rename = "TransactionID")]
    pub transaction_id: Option<String>,
    /// メッセージ ID
    #[serde(rename = "MessageID")]
    pub message_id:     Option<String>,
}

/// トランザクションメール送信トレイト
///
/// 1 回の呼び出しで 1 通のメールを複数宛先へ送信する。
#[async_trait]
pub trait TransactionalEmailApi: Send + Sync {
    /// トランザクションメールを送信する
    async fn emails_transactional_post(
        &self,
        payload: &OutboundPayload,
    ) -> Result<TransactionalReceipt, InfraError>;

    /// プロバイダ名（ログ用）
    fn provider_name(&self) -> &'static str;
}
