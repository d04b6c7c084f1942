//! # 配信プロバイダ設定
//!
//! 環境変数から Elastic Email クライアントの設定を読み込む。
//!
//! トランスポート自体は環境変数を参照しない。ここで読むのはプロバイダ
//! クライアントの接続設定のみ。

use std::{env, time::Duration};

use crate::error::InfraError;

/// Elastic Email API の既定のベース URL
pub const DEFAULT_BASE_URL: &str = "https://api.elasticemail.com/v4";

/// 既定のリクエストタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Elastic Email クライアントの設定
#[derive(Clone)]
pub struct ElasticEmailConfig {
    /// API キー（`X-ElasticEmail-ApiKey` ヘッダで送信）
    pub api_key:  String,
    /// API のベース URL（末尾の `/` は含めない）
    pub base_url: String,
    /// HTTP リクエストタイムアウト
    pub timeout:  Duration,
}

impl ElasticEmailConfig {
    /// API キーを指定し、その他は既定値で設定を作成する
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key:  api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout:  Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// ベース URL を差し替える（テスト用のフェイクサーバーなど）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 環境変数から設定を読み込む
    ///
    /// - `ELASTIC_EMAIL_API_KEY`（必須）
    /// - `ELASTIC_EMAIL_BASE_URL`（任意、既定: [`DEFAULT_BASE_URL`]）
    /// - `ELASTIC_EMAIL_TIMEOUT_SECS`（任意、既定: [`DEFAULT_TIMEOUT_SECS`]）
    pub fn from_env() -> Result<Self, InfraError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InfraError> {
        let api_key = lookup("ELASTIC_EMAIL_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                InfraError::configuration("ELASTIC_EMAIL_API_KEY が設定されていません")
            })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("ELASTIC_EMAIL_BASE_URL") {
            config = config.with_base_url(base_url.trim());
            if config.base_url.is_empty() {
                return Err(InfraError::configuration("ELASTIC_EMAIL_BASE_URL が空です"));
            }
        }

        if let Some(timeout) = lookup("ELASTIC_EMAIL_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| {
                InfraError::configuration(format!(
                    "ELASTIC_EMAIL_TIMEOUT_SECS は秒数である必要があります: {timeout}"
                ))
            })?;
            if secs == 0 {
                return Err(InfraError::configuration(
                    "ELASTIC_EMAIL_TIMEOUT_SECS は 1 以上である必要があります",
                ));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl std::fmt::Debug for ElasticEmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticEmailConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::error::InfraErrorKind;

    fn lookup_from(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn 必須項目のみの場合は既定値が使われる() {
        let config =
            ElasticEmailConfig::from_lookup(lookup_from(&[("ELASTIC_EMAIL_API_KEY", "key")]))
                .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn 任意項目を上書きできる() {
        let config = ElasticEmailConfig::from_lookup(lookup_from(&[
            ("ELASTIC_EMAIL_API_KEY", "key"),
            ("ELASTIC_EMAIL_BASE_URL", "http://localhost:8080/v4/"),
            ("ELASTIC_EMAIL_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/v4");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn api_keyがなければ設定エラー() {
        let err = ElasticEmailConfig::from_lookup(lookup_from(&[])).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Configuration(_)));
    }

    #[rstest]
    #[case("ELASTIC_EMAIL_TIMEOUT_SECS", "abc")]
    #[case("ELASTIC_EMAIL_TIMEOUT_SECS", "0")]
    #[case("ELASTIC_EMAIL_BASE_URL", "")]
    #[case("ELASTIC_EMAIL_BASE_URL", "/")]
    #[case("ELASTIC_EMAIL_BASE_URL", "  ")]
    fn 不正な任意項目は設定エラー(#[case] key: &'static str, #[case] value: &'static str) {
        let err = ElasticEmailConfig::from_lookup(lookup_from(&[
            ("ELASTIC_EMAIL_API_KEY", "key"),
            (key, value),
        ]))
        .unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Configuration(_)));
    }

    #[test]
    fn debug出力でapi_keyを伏せる() {
        let config = ElasticEmailConfig::new("secret-key");

        assert!(!format!("{config:?}").contains("secret-key"));
    }
}
