//! # メッセージ → 送信ペイロード変換
//!
//! [`Message`] をトランザクションメール API の [`OutboundPayload`] に変換する純粋関数群。
//!
//! ## 設計方針
//!
//! - **副作用なし**: 同じ入力に対して何度呼んでも同じ出力を返す
//! - **本文は後勝ち**: 同種の本文候補が複数ある場合は最後に出現したものを採用し、結合しない
//! - **構造化ヘッダは除外**: 宛先・件名・Content-Type はペイロードの専用フィールドで表現する

use crate::{
    message::{Address, Message, MimeEntity},
    payload::{
        BodyPart,
        EmailContent,
        HeaderMap,
        MessageAttachment,
        OutboundPayload,
        TransactionalRecipients,
    },
};

const CONTENT_TYPE_PLAIN: &str = "text/plain";
const CONTENT_TYPE_HTML: &str = "text/html";

/// カスタムヘッダへの射影から除外するヘッダ名（小文字）
pub const BYPASS_HEADERS: [&str; 6] = ["from", "to", "cc", "bcc", "subject", "content-type"];

/// アドレスを送信用の文字列に整形する
///
/// 表示名が空でなければ `"{name} <{email}>"`、そうでなければ `email` をそのまま返す。
pub fn format_address(email: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{name} <{email}>"),
        _ => email.to_string(),
    }
}

/// アドレス一覧を整形済み文字列の一覧にする
pub fn format_addresses(addresses: &[Address]) -> Vec<String> {
    addresses.iter().map(Address::format).collect()
}

/// アドレス一覧を `", "` で連結する（空の場合は `None`）
pub fn join_addresses(addresses: &[Address]) -> Option<String> {
    if addresses.is_empty() {
        return None;
    }
    Some(format_addresses(addresses).join(", "))
}

fn non_empty(addresses: &[Address]) -> Option<Vec<String>> {
    (!addresses.is_empty()).then(|| format_addresses(addresses))
}

/// 宛先を構築する
pub fn build_recipients(message: &Message) -> TransactionalRecipients {
    TransactionalRecipients {
        to:  non_empty(message.to_addresses()),
        cc:  non_empty(message.cc_addresses()),
        bcc: non_empty(message.bcc_addresses()),
    }
}

/// 本文パートを解決する
///
/// トップレベルの Content-Type が `text/plain` ちょうどであれば本文をテキスト候補、
/// それ以外は HTML 候補とする。子パートは出現順に走査し、`text/html` / `text/plain` の
/// パートが該当する候補を上書きする。結果は HTML、テキストの順に値のある候補のみ並べる。
pub fn resolve_body(message: &Message) -> Vec<BodyPart> {
    let mut html = None;
    let mut text = None;

    if message.top_level_content_type() == CONTENT_TYPE_PLAIN {
        text = message.top_level_body();
    } else {
        html = message.top_level_body();
    }

    for child in message.children() {
        let MimeEntity::Part(part) = child else {
            continue;
        };
        match part.content_type.as_str() {
            CONTENT_TYPE_HTML => html = Some(part.body.as_str()),
            CONTENT_TYPE_PLAIN => text = Some(part.body.as_str()),
            _ => {}
        }
    }

    html.map(BodyPart::html)
        .into_iter()
        .chain(text.map(BodyPart::plain_text))
        .collect()
}

/// カスタムヘッダを射影する
///
/// [`BYPASS_HEADERS`] に含まれる名前（大文字小文字を区別しない）を除く全ヘッダを、
/// 宣言時の名前と生の値で順序を保って格納する。
pub fn project_headers(message: &Message) -> HeaderMap {
    message
        .header_fields()
        .into_iter()
        .filter(|header| {
            !BYPASS_HEADERS
                .iter()
                .any(|bypass| header.name.eq_ignore_ascii_case(bypass))
        })
        .map(|header| (header.name, header.value))
        .collect()
}

/// 添付ファイルを射影する
///
/// 添付ファイルのみを出現順に抽出する。本文パートは含めない。
pub fn project_attachments(message: &Message) -> Vec<MessageAttachment> {
    message
        .children()
        .iter()
        .filter_map(|child| match child {
            MimeEntity::Attachment(attachment) => Some(MessageAttachment {
                name:           attachment.filename.clone(),
                content_type:   attachment.content_type.clone(),
                binary_content: attachment.content.clone(),
            }),
            MimeEntity::Part(_) => None,
        })
        .collect()
}

/// 送信ペイロードを構築する
pub fn build_payload(message: &Message) -> OutboundPayload {
    OutboundPayload {
        recipients: build_recipients(message),
        content:    EmailContent {
            body:        resolve_body(message),
            from:        join_addresses(message.sender_addresses()).unwrap_or_default(),
            reply_to:    join_addresses(message.reply_to_addresses()),
            subject:     message.subject_text().map(str::to_string),
            headers:     project_headers(message),
            attachments: project_attachments(message),
        },
    }
}
