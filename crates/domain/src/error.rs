//! # ドメイン層エラー定義
//!
//! 送信前提条件の違反を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **プロバイダ失敗は含めない**: 送信 API の失敗はトランスポートが結果として報告し、
//!   エラーとしては伝播しない
//!
//! ## 使用例
//!
//! ```rust
//! use mailbridge_domain::{MailError, message::Message};
//!
//! fn ensure_recipient(message: &Message) -> Result<(), MailError> {
//!     if !message.has_recipient() {
//!         return Err(MailError::InvalidMessage(
//!             "Cannot send message without a recipient".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(ensure_recipient(&Message::new()).is_err());
//! ```

use thiserror::Error;

/// メール送信で発生するエラー
///
/// ネットワーク呼び出しの前に同期的に検出される。
/// 呼び出し元はメッセージを修正して再送する必要がある。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MailError {
    /// 不正なメッセージ
    ///
    /// 宛先（To）が 1 件も存在しない場合など、送信の前提条件を満たさない場合に使用する。
    #[error("不正なメッセージ: {0}")]
    InvalidMessage(String),
}

impl MailError {
    /// 宛先なしエラーを生成する
    pub fn missing_recipient() -> Self {
        Self::InvalidMessage("Cannot send message without a recipient".to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_recipientはinvalid_messageを返す() {
        let error = MailError::missing_recipient();

        assert_eq!(
            error.to_string(),
            "不正なメッセージ: Cannot send message without a recipient"
        );
        assert!(matches!(error, MailError::InvalidMessage(_)));
    }
}
