//! # テスト用モック
//!
//! トランスポートのテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailbridge-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mailbridge_domain::{
    event::{SendEvent, SendListener, SendPhase, SendResult},
    payload::OutboundPayload,
};

use crate::{
    error::InfraError,
    provider::{TransactionalEmailApi, TransactionalReceipt},
};

// ===== MockTransactionalEmailApi =====

/// 受け取ったペイロードを記録する送信 API モック
///
/// [`failing`](MockTransactionalEmailApi::failing) で作成すると常に API エラーを返す。
#[derive(Clone, Default)]
pub struct MockTransactionalEmailApi {
    payloads: Arc<Mutex<Vec<OutboundPayload>>>,
    fail:     bool,
}

impl MockTransactionalEmailApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に失敗するモックを作成する
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 受け取ったペイロード
    pub fn payloads(&self) -> Vec<OutboundPayload> {
        self.payloads.lock().unwrap().clone()
    }

    /// 呼び出し回数
    pub fn call_count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionalEmailApi for MockTransactionalEmailApi {
    async fn emails_transactional_post(
        &self,
        payload: &OutboundPayload,
    ) -> Result<TransactionalReceipt, InfraError> {
        self.payloads.lock().unwrap().push(payload.clone());
        if self.fail {
            return Err(InfraError::api(500, "mock failure"));
        }
        Ok(TransactionalReceipt {
            transaction_id: Some("mock-transaction".to_string()),
            message_id:     Some("mock-message".to_string()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

// ===== RecordingListener =====

/// リスナーが観測した通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedEvent {
    pub phase:             SendPhase,
    pub result:            SendResult,
    pub failed_recipients: Vec<String>,
}

/// 通知を記録する送信イベントリスナー
///
/// [`cancelling`](RecordingListener::cancelling) で作成すると送信前通知で送信を中止する。
#[derive(Clone, Default)]
pub struct RecordingListener {
    observed: Arc<Mutex<Vec<ObservedEvent>>>,
    cancel:   bool,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信前に中止するリスナーを作成する
    pub fn cancelling() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }

    pub fn observed(&self) -> Vec<ObservedEvent> {
        self.observed.lock().unwrap().clone()
    }

    fn record(&self, phase: SendPhase, event: &SendEvent<'_>) {
        self.observed.lock().unwrap().push(ObservedEvent {
            phase,
            result: event.result(),
            failed_recipients: event.failed_recipients().to_vec(),
        });
    }
}

impl SendListener for RecordingListener {
    fn before_send_performed(&self, event: &mut SendEvent<'_>) {
        self.record(SendPhase::BeforeSendPerformed, event);
        if self.cancel {
            event.cancel_bubble();
        }
    }

    fn send_performed(&self, event: &mut SendEvent<'_>) {
        self.record(SendPhase::SendPerformed, event);
    }
}
