//! # メッセージモデル
//!
//! 呼び出し元が組み立てる送信対象メールを表現する。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: トランスポートは `&Message` を受け取り、変更しない
//! - **ビルダー形式**: `Message::new().from(..).to(..)` のように `self` を返すメソッドで組み立てる
//! - **子エンティティ**: 代替本文（[`MimePart`]）と添付ファイル（[`Attachment`]）を
//!   [`MimeEntity`] として出現順に保持する
//!
//! ## 含まれる型
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`Address`] | メールアドレスと表示名 |
//! | [`Header`] | 生のヘッダフィールド |
//! | [`MimePart`] | 代替本文パート（text/plain, text/html など） |
//! | [`Attachment`] | 添付ファイル |
//! | [`MimeEntity`] | メッセージの子エンティティ |
//! | [`Message`] | 送信対象メッセージ |

use derive_more::Constructor;

use crate::translate::{format_address, join_addresses};

/// トップレベルの Content-Type の既定値
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// メールアドレス（値オブジェクト）
///
/// 表示名は任意。送信時の書式は [`format_address`] に従う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    email: String,
    name:  Option<String>,
}

impl Address {
    /// 表示名なしのアドレスを作成する
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name:  None,
        }
    }

    /// 表示名付きのアドレスを作成する
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name:  Some(name.into()),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 送信用の文字列に整形する（`Name <email>` または `email`）
    pub fn format(&self) -> String {
        format_address(&self.email, self.name())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

/// ヘッダフィールド
///
/// 名前は宣言時の大文字小文字をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Header {
    pub name:  String,
    pub value: String,
}

/// 代替本文パート
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct MimePart {
    pub content_type: String,
    pub body:         String,
}

/// 添付ファイル
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Attachment {
    pub filename:     String,
    pub content_type: String,
    pub content:      Vec<u8>,
}

/// メッセージの子エンティティ
///
/// 出現順に保持し、本文解決と添付抽出の双方がこの順序で走査する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeEntity {
    /// 代替本文パート
    Part(MimePart),
    /// 添付ファイル
    Attachment(Attachment),
}

/// 送信対象メッセージ
///
/// 呼び出し元が所有し、トランスポートは読み取りのみ行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    from:         Vec<Address>,
    reply_to:     Vec<Address>,
    to:           Vec<Address>,
    cc:           Vec<Address>,
    bcc:          Vec<Address>,
    subject:      Option<String>,
    content_type: String,
    body:         Option<String>,
    headers:      Vec<Header>,
    children:     Vec<MimeEntity>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            from:         Vec::new(),
            reply_to:     Vec::new(),
            to:           Vec::new(),
            cc:           Vec::new(),
            bcc:          Vec::new(),
            subject:      None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            body:         None,
            headers:      Vec::new(),
            children:     Vec::new(),
        }
    }
}

impl Message {
    /// 空のメッセージを作成する（Content-Type は `text/plain`）
    pub fn new() -> Self {
        Self::default()
    }

    // ===== ビルダー =====

    pub fn from(mut self, address: Address) -> Self {
        self.from.push(address);
        self
    }

    pub fn reply_to(mut self, address: Address) -> Self {
        self.reply_to.push(address);
        self
    }

    pub fn to(mut self, address: Address) -> Self {
        self.to.push(address);
        self
    }

    pub fn cc(mut self, address: Address) -> Self {
        self.cc.push(address);
        self
    }

    pub fn bcc(mut self, address: Address) -> Self {
        self.bcc.push(address);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// トップレベルの Content-Type を設定する
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// トップレベルの本文を設定する
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// カスタムヘッダを追加する
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name.into(), value.into()));
        self
    }

    /// 代替本文パートを追加する
    pub fn part(mut self, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        self.children
            .push(MimeEntity::Part(MimePart::new(content_type.into(), body.into())));
        self
    }

    /// 添付ファイルを追加する
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.children.push(MimeEntity::Attachment(attachment));
        self
    }

    // ===== アクセサ =====

    pub fn sender_addresses(&self) -> &[Address] {
        &self.from
    }

    pub fn reply_to_addresses(&self) -> &[Address] {
        &self.reply_to
    }

    pub fn to_addresses(&self) -> &[Address] {
        &self.to
    }

    pub fn cc_addresses(&self) -> &[Address] {
        &self.cc
    }

    pub fn bcc_addresses(&self) -> &[Address] {
        &self.bcc
    }

    pub fn subject_text(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn top_level_content_type(&self) -> &str {
        &self.content_type
    }

    pub fn top_level_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn custom_headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn children(&self) -> &[MimeEntity] {
        &self.children
    }

    /// To 宛先が存在するか
    pub fn has_recipient(&self) -> bool {
        !self.to.is_empty()
    }

    /// メッセージが持つ全ヘッダフィールドを返す
    ///
    /// 構造化フィールド（From, Reply-To, To, Cc, Bcc, Subject, Content-Type）を
    /// 値がある場合のみ先頭に並べ、続けてカスタムヘッダを追加順に並べる。
    pub fn header_fields(&self) -> Vec<Header> {
        let structural = [
            ("From", join_addresses(&self.from)),
            ("Reply-To", join_addresses(&self.reply_to)),
            ("To", join_addresses(&self.to)),
            ("Cc", join_addresses(&self.cc)),
            ("Bcc", join_addresses(&self.bcc)),
            ("Subject", self.subject.clone()),
            ("Content-Type", Some(self.content_type.clone())),
        ];

        structural
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| Header::new(name.to_string(), v)))
            .chain(self.custom_headers().iter().cloned())
            .collect()
    }
}
