//! # メール送信トランスポート
//!
//! メッセージをトランザクションメール API 経由で送信するアダプタ。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailTransport` trait が呼び出し元から見た送信口
//! - **接続ライフサイクルなし**: 常に開始済みとして振る舞い、`start` / `stop` は何もしない
//! - **1 送信 1 呼び出し**: プロバイダは送信ごとに 1 回だけ呼び出し、再試行しない
//! - **失敗は結果で報告**: プロバイダの失敗は [`SendOutcome`] と送信後イベントで伝え、
//!   エラーとしては返さない
//!
//! ## 送信の流れ
//!
//! ```text
//! 送信前イベント ─┬─ キャンセル → 0 件で終了
//!                 └─ To 検証 ─┬─ 宛先なし → MailError::InvalidMessage
//!                             └─ ペイロード構築 → API 呼び出し → 送信後イベント → 結果
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use mailbridge_domain::{
    MailError,
    event::{EventDispatcher, SendListener, SendPhase, SendResult},
    message::Message,
    translate::build_payload,
};
use mailbridge_shared::{
    event_log::{error, event},
    log_business_event,
};

use crate::provider::TransactionalEmailApi;

/// 送信の終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// 送信前リスナーが中止した
    Cancelled,
    /// プロバイダが受け付けた
    Succeeded,
    /// プロバイダ呼び出しが失敗した
    Failed,
}

/// 送信結果
///
/// 受け付けられた宛先数と、失敗した宛先（整形済みアドレス）を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub status:            SendStatus,
    /// 受け付けられた To 宛先数
    pub accepted:          usize,
    /// 失敗した宛先
    pub failed_recipients: Vec<String>,
}

impl SendOutcome {
    /// 送信前リスナーによる中止
    pub fn cancelled() -> Self {
        Self {
            status:            SendStatus::Cancelled,
            accepted:          0,
            failed_recipients: Vec::new(),
        }
    }

    pub fn succeeded(accepted: usize) -> Self {
        Self {
            status: SendStatus::Succeeded,
            accepted,
            failed_recipients: Vec::new(),
        }
    }

    /// 送信失敗（To 宛先すべてを失敗とみなす）
    pub fn failed(failed_recipients: Vec<String>) -> Self {
        Self {
            status: SendStatus::Failed,
            accepted: 0,
            failed_recipients,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SendStatus::Succeeded
    }
}

/// メール送信トランスポート
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// 開始済みか
    fn is_started(&self) -> bool;

    /// トランスポートを開始する
    fn start(&self);

    /// トランスポートを停止する
    fn stop(&self);

    /// 送信可能か確認する
    fn ping(&self) -> bool;

    /// 送信イベントのリスナー（プラグイン）を登録する
    fn register_plugin(&self, plugin: Arc<dyn SendListener>);

    /// メッセージを送信する
    ///
    /// # エラー
    ///
    /// To 宛先がない場合は `MailError::InvalidMessage` を返す。
    /// プロバイダ呼び出しの失敗はエラーではなく [`SendStatus::Failed`] の結果として返す。
    async fn send(&self, message: &Message) -> Result<SendOutcome, MailError>;
}

/// Elastic Email トランスポート
///
/// イベント発行ケイパビリティと API クライアントを保持する。
/// どちらのライフサイクルも呼び出し元が所有する。
pub struct ElasticEmailTransport {
    dispatcher: Arc<dyn EventDispatcher>,
    client:     Arc<dyn TransactionalEmailApi>,
}

impl ElasticEmailTransport {
    /// イベント・ログ上のトランスポート名
    pub const NAME: &'static str = "elastic_email";

    pub fn new(
        dispatcher: Arc<dyn EventDispatcher>,
        client: Arc<dyn TransactionalEmailApi>,
    ) -> Self {
        Self { dispatcher, client }
    }
}

#[async_trait]
impl MailTransport for ElasticEmailTransport {
    fn is_started(&self) -> bool {
        true
    }

    fn start(&self) {}

    fn stop(&self) {}

    fn ping(&self) -> bool {
        true
    }

    fn register_plugin(&self, plugin: Arc<dyn SendListener>) {
        self.dispatcher.bind_event_listener(plugin);
    }

    #[tracing::instrument(skip_all, fields(transport = ElasticEmailTransport::NAME))]
    async fn send(&self, message: &Message) -> Result<SendOutcome, MailError> {
        let mut send_event = self.dispatcher.create_send_event(Self::NAME, message);

        if let Some(evt) = send_event.as_mut() {
            self.dispatcher.dispatch_event(evt, SendPhase::BeforeSendPerformed);
            if evt.bubble_cancelled() {
                log_business_event!(
                    event.category = event::category::MAIL,
                    event.action = event::action::MAIL_CANCELLED,
                    event.entity_type = event::entity_type::TRANSACTIONAL_MESSAGE,
                    mail.transport = Self::NAME,
                    mail.provider = self.client.provider_name(),
                    event.result = event::result::SKIPPED,
                    "送信前リスナーが送信を中止"
                );
                return Ok(SendOutcome::cancelled());
            }
        }

        if !message.has_recipient() {
            tracing::warn!(
                error.category = error::category::VALIDATION,
                error.kind = error::kind::MISSING_RECIPIENT,
                "宛先のないメッセージは送信できない"
            );
            return Err(MailError::missing_recipient());
        }

        let payload = build_payload(message);
        let to = payload.to_addresses().to_vec();
        tracing::debug!(
            to_count = to.len(),
            body_parts = payload.content.body.len(),
            attachments = payload.content.attachments.len(),
            "送信ペイロードを構築"
        );

        let outcome = match self.client.emails_transactional_post(&payload).await {
            Ok(receipt) => {
                log_business_event!(
                    event.category = event::category::MAIL,
                    event.action = event::action::MAIL_SENT,
                    event.entity_type = event::entity_type::TRANSACTIONAL_MESSAGE,
                    mail.transport = Self::NAME,
                    mail.provider = self.client.provider_name(),
                    event.result = event::result::SUCCESS,
                    mail.accepted = to.len(),
                    mail.message_id = receipt.message_id.as_deref(),
                    "メール送信成功"
                );
                SendOutcome::succeeded(to.len())
            }
            Err(e) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::PROVIDER_SEND,
                    error = %e,
                    "プロバイダ呼び出しに失敗"
                );
                log_business_event!(
                    event.category = event::category::MAIL,
                    event.action = event::action::MAIL_FAILED,
                    event.entity_type = event::entity_type::TRANSACTIONAL_MESSAGE,
                    mail.transport = Self::NAME,
                    mail.provider = self.client.provider_name(),
                    event.result = event::result::FAILURE,
                    mail.failed = to.len(),
                    "メール送信失敗"
                );
                SendOutcome::failed(to)
            }
        };

        if let Some(evt) = send_event.as_mut() {
            evt.set_result(match outcome.status {
                SendStatus::Failed => SendResult::Failed,
                _ => SendResult::Success,
            });
            evt.set_failed_recipients(outcome.failed_recipients.clone());
            self.dispatcher.dispatch_event(evt, SendPhase::SendPerformed);
        }

        Ok(outcome)
    }
}
