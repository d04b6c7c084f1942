//! Noop 送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 開発環境や配信無効化時に使用する。

use async_trait::async_trait;
use mailbridge_domain::payload::OutboundPayload;

use super::{TransactionalEmailApi, TransactionalReceipt};
use crate::error::InfraError;

/// Noop 送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopTransactionalEmailApi;

#[async_trait]
impl TransactionalEmailApi for NoopTransactionalEmailApi {
    async fn emails_transactional_post(
        &self,
        payload: &OutboundPayload,
    ) -> Result<TransactionalReceipt, InfraError> {
        tracing::info!(
            to = ?payload.to_addresses(),
            subject = payload.content.subject.as_deref(),
            "Noop: メール送信をスキップ"
        );
        Ok(TransactionalReceipt::default())
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }
}
