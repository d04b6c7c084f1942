//! # 送信ペイロード
//!
//! トランザクションメール API（Elastic Email v4 `/emails/transactional`）に渡す
//! リクエスト形状を定義する。
//!
//! ## 設計方針
//!
//! - **送信ごとに生成**: 再利用・キャッシュしない
//! - **serde でワイヤ形式に直結**: キーは PascalCase、未設定の宛先種別は出力しない
//! - **添付は base64**: バイナリ本文は標準 base64 文字列としてシリアライズする
//!
//! ## JSON 形状
//!
//! ```json
//! {
//!   "Recipients": { "To": ["Ann <a@x.com>"] },
//!   "Content": {
//!     "Body": [{ "ContentType": "HTML", "Content": "<p>hi</p>" }],
//!     "From": "noreply@example.com",
//!     "Subject": "hi",
//!     "Headers": { "X-Custom": "v" },
//!     "Attachments": []
//!   }
//! }
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Serialize, Serializer, ser::SerializeMap};

/// 本文の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum BodyContentType {
    /// HTML 本文
    #[serde(rename = "HTML")]
    #[strum(serialize = "HTML")]
    Html,
    /// プレーンテキスト本文
    PlainText,
}

/// 本文パート
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BodyPart {
    pub content_type: BodyContentType,
    pub content:      String,
}

impl BodyPart {
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content_type: BodyContentType::Html,
            content:      content.into(),
        }
    }

    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: BodyContentType::PlainText,
            content:      content.into(),
        }
    }
}

/// 添付ファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttachment {
    pub name:           String,
    pub content_type:   String,
    #[serde(serialize_with = "serialize_base64")]
    pub binary_content: Vec<u8>,
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// 順序付きヘッダマップ
///
/// 同名のヘッダを挿入した場合は、位置を保ったまま値を上書きする。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap(Vec<(String, String)>);

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダを挿入する（同名が既にあれば値のみ置き換える）
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// 宛先
///
/// 各種別は空でないリストか、明示的な未設定（`None`）のいずれか。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionalRecipients {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to:  Option<Vec<String>>,
    #[serde(rename = "CC", skip_serializing_if = "Option::is_none")]
    pub cc:  Option<Vec<String>>,
    #[serde(rename = "BCC", skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
}

/// メール内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailContent {
    pub body:        Vec<BodyPart>,
    pub from:        String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to:    Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject:     Option<String>,
    pub headers:     HeaderMap,
    pub attachments: Vec<MessageAttachment>,
}

/// トランザクション送信ペイロード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundPayload {
    pub recipients: TransactionalRecipients,
    pub content:    EmailContent,
}

impl OutboundPayload {
    /// To 宛先の一覧を返す（未設定の場合は空）
    pub fn to_addresses(&self) -> &[String] {
        self.recipients.to.as_deref().unwrap_or_default()
    }
}
