//! Elastic Email 送信実装
//!
//! Elastic Email v4 の `POST /emails/transactional` を reqwest で呼び出す。
//! 本番環境で使用する。

use async_trait::async_trait;
use mailbridge_domain::payload::OutboundPayload;
use reqwest::Client;

use super::{TransactionalEmailApi, TransactionalReceipt};
use crate::{config::ElasticEmailConfig, error::InfraError};

/// API キーを送るリクエストヘッダ名
const API_KEY_HEADER: &str = "X-ElasticEmail-ApiKey";

/// Elastic Email 送信クライアント
///
/// `reqwest::Client` をラップする。タイムアウトは設定値に従い、
/// 再試行は行わない。
#[derive(Debug, Clone)]
pub struct ElasticEmailClient {
    http:   Client,
    config: ElasticEmailConfig,
}

impl ElasticEmailClient {
    /// 新しいクライアントを作成する
    ///
    /// # エラー
    ///
    /// HTTP クライアントの構築に失敗した場合（TLS バックエンドの初期化失敗など）。
    pub fn new(config: ElasticEmailConfig) -> Result<Self, InfraError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// 環境変数の設定からクライアントを作成する
    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(ElasticEmailConfig::from_env()?)
    }

    fn transactional_url(&self) -> String {
        format!("{}/emails/transactional", self.config.base_url)
    }
}

#[async_trait]
impl TransactionalEmailApi for ElasticEmailClient {
    #[tracing::instrument(
        skip_all,
        fields(provider = "elastic_email", to_count = payload.to_addresses().len())
    )]
    async fn emails_transactional_post(
        &self,
        payload: &OutboundPayload,
    ) -> Result<TransactionalReceipt, InfraError> {
        let response = self
            .http
            .post(self.transactional_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Elastic Email が送信を拒否");
            return Err(InfraError::api(status.as_u16(), body));
        }

        if body.trim().is_empty() {
            return Ok(TransactionalReceipt::default());
        }

        let receipt: TransactionalReceipt = serde_json::from_str(&body)?;
        tracing::debug!(
            transaction_id = receipt.transaction_id.as_deref(),
            message_id = receipt.message_id.as_deref(),
            "Elastic Email が送信を受け付けた"
        );
        Ok(receipt)
    }

    fn provider_name(&self) -> &'static str {
        "elastic_email"
    }
}
