//! テスト共通フィクスチャ
//!
//! Elastic Email API を模したフェイクサーバーを axum で起動する。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use mailbridge_infra::{ElasticEmailClient, ElasticEmailConfig};
use serde_json::Value;

/// フェイクサーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub api_key: Option<String>,
    pub body:    Value,
}

#[derive(Clone)]
struct FakeState {
    status:   StatusCode,
    response: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Elastic Email のフェイクサーバー
pub struct FakeElasticEmail {
    pub base_url: String,
    received:     Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl FakeElasticEmail {
    /// 指定したステータスと本文を常に返すフェイクサーバーを起動する
    pub async fn start(status: StatusCode, response: &str) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            response: response.to_string(),
            received: received.clone(),
        };
        let app = Router::new()
            .route("/v4/emails/transactional", post(transactional))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v4"),
            received,
        }
    }

    /// 受付成功（200）を返すフェイクサーバーを起動する
    pub async fn accepting() -> Self {
        Self::start(
            StatusCode::OK,
            r#"{"TransactionID":"tx-123","MessageID":"msg-456"}"#,
        )
        .await
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }

    /// このサーバーに接続するクライアントを作成する
    pub fn client(&self) -> ElasticEmailClient {
        let config = ElasticEmailConfig::new(TEST_API_KEY).with_base_url(&self.base_url);
        ElasticEmailClient::new(config).unwrap()
    }
}

/// テスト用 API キー
pub const TEST_API_KEY: &str = "test-api-key";

async fn transactional(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let api_key = headers
        .get("X-ElasticEmail-ApiKey")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .received
        .lock()
        .unwrap()
        .push(ReceivedRequest { api_key, body });

    (state.status, state.response.clone())
}
