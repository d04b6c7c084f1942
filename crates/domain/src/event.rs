//! # 送信イベント
//!
//! 送信の前後で登録済みリスナーへ通知する仕組みを定義する。
//!
//! ## 設計方針
//!
//! - **注入されるケイパビリティ**: トランスポートは [`EventDispatcher`] trait 越しにイベントを扱う
//! - **同期通知**: リスナーは登録順に同期的に呼び出される
//! - **キャンセル**: 送信前通知でリスナーが [`SendEvent::cancel_bubble`] を呼ぶと送信を中止する
//! - **2 つの実装**: オブザーバーリスト（[`ListenerDispatcher`]）、イベント非対応（[`NoopEventDispatcher`]）
//!
//! ## フェーズ
//!
//! | フェーズ | タイミング | リスナーの用途 |
//! |---------|-----------|---------------|
//! | [`SendPhase::BeforeSendPerformed`] | プロバイダ呼び出し前 | 送信の中止 |
//! | [`SendPhase::SendPerformed`] | 送信試行後（成否問わず） | 結果・失敗宛先の参照 |

use std::sync::{Arc, Mutex};

use crate::message::Message;

/// 通知フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum SendPhase {
    /// 送信前
    BeforeSendPerformed,
    /// 送信後
    SendPerformed,
}

/// 送信結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SendResult {
    /// 未確定（送信前）
    #[default]
    Pending,
    /// 成功
    Success,
    /// 失敗
    Failed,
}

/// 送信イベント
///
/// 1 回の送信呼び出しの間だけ存在する。対象メッセージを借用する。
#[derive(Debug)]
pub struct SendEvent<'a> {
    transport:         &'static str,
    message:           &'a Message,
    result:            SendResult,
    failed_recipients: Vec<String>,
    cancelled:         bool,
}

impl<'a> SendEvent<'a> {
    pub fn new(transport: &'static str, message: &'a Message) -> Self {
        Self {
            transport,
            message,
            result: SendResult::Pending,
            failed_recipients: Vec::new(),
            cancelled: false,
        }
    }

    /// イベントを発生させたトランスポート名
    pub fn transport(&self) -> &'static str {
        self.transport
    }

    pub fn message(&self) -> &'a Message {
        self.message
    }

    pub fn result(&self) -> SendResult {
        self.result
    }

    pub fn set_result(&mut self, result: SendResult) {
        self.result = result;
    }

    pub fn failed_recipients(&self) -> &[String] {
        &self.failed_recipients
    }

    pub fn set_failed_recipients(&mut self, recipients: Vec<String>) {
        self.failed_recipients = recipients;
    }

    /// 送信を中止する（以降のリスナーにも通知は続く）
    pub fn cancel_bubble(&mut self) {
        self.cancelled = true;
    }

    pub fn bubble_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// 送信イベントのリスナー
///
/// 必要なフェーズのメソッドだけを実装する。
pub trait SendListener: Send + Sync {
    /// 送信前に呼ばれる
    fn before_send_performed(&self, _event: &mut SendEvent<'_>) {}

    /// 送信試行後に呼ばれる
    fn send_performed(&self, _event: &mut SendEvent<'_>) {}
}

/// イベント発行ケイパビリティ
///
/// トランスポートのライフサイクルとは独立し、呼び出し元が所有する。
pub trait EventDispatcher: Send + Sync {
    /// 送信イベントを作成する（イベント非対応の場合は `None`）
    fn create_send_event<'a>(
        &self,
        transport: &'static str,
        message: &'a Message,
    ) -> Option<SendEvent<'a>>;

    /// 指定フェーズのリスナーへイベントを通知する
    fn dispatch_event(&self, event: &mut SendEvent<'_>, phase: SendPhase);

    /// リスナーを登録する
    fn bind_event_listener(&self, listener: Arc<dyn SendListener>);
}

/// オブザーバーリストによるイベント発行
///
/// 登録順にリスナーを保持し、通知時は同期的に順番に呼び出す。
#[derive(Clone, Default)]
pub struct ListenerDispatcher {
    listeners: Arc<Mutex<Vec<Arc<dyn SendListener>>>>,
}

impl ListenerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みリスナー数
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn SendListener>>> {
        // リスナーが panic してもリスト自体は壊れないため、poison は無視する
        self.listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ListenerDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventDispatcher for ListenerDispatcher {
    fn create_send_event<'a>(
        &self,
        transport: &'static str,
        message: &'a Message,
    ) -> Option<SendEvent<'a>> {
        Some(SendEvent::new(transport, message))
    }

    fn dispatch_event(&self, event: &mut SendEvent<'_>, phase: SendPhase) {
        // 通知中のリスナー登録でデッドロックしないよう、スナップショットに対して通知する
        let listeners = self.lock_listeners().clone();
        for listener in listeners {
            match phase {
                SendPhase::BeforeSendPerformed => listener.before_send_performed(event),
                SendPhase::SendPerformed => listener.send_performed(event),
            }
        }
    }

    fn bind_event_listener(&self, listener: Arc<dyn SendListener>) {
        self.lock_listeners().push(listener);
    }
}

/// イベント非対応の発行者
///
/// 送信イベントを作成しないため、キャンセルも送信後通知も行われない。
#[derive(Debug, Clone, Default)]
pub struct NoopEventDispatcher;

impl EventDispatcher for NoopEventDispatcher {
    fn create_send_event<'a>(
        &self,
        _transport: &'static str,
        _message: &'a Message,
    ) -> Option<SendEvent<'a>> {
        None
    }

    fn dispatch_event(&self, _event: &mut SendEvent<'_>, _phase: SendPhase) {}

    fn bind_event_listener(&self, _listener: Arc<dyn SendListener>) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// 呼び出し順を共有ログに記録するリスナー
    struct OrderListener {
        label:  &'static str,
        log:    Arc<Mutex<Vec<String>>>,
        cancel: bool,
    }

    impl SendListener for OrderListener {
        fn before_send_performed(&self, event: &mut SendEvent<'_>) {
            self.log.lock().unwrap().push(format!("before:{}", self.label));
            if self.cancel {
                event.cancel_bubble();
            }
        }

        fn send_performed(&self, event: &mut SendEvent<'_>) {
            self.log
                .lock()
                .unwrap()
                .push(format!("after:{}:{}", self.label, event.result()));
        }
    }

    /// 通知中に別のリスナーを登録するリスナー
    struct RegisteringListener {
        dispatcher: ListenerDispatcher,
    }

    impl SendListener for RegisteringListener {
        fn before_send_performed(&self, _event: &mut SendEvent<'_>) {
            self.dispatcher.bind_event_listener(Arc::new(NoopListener));
        }
    }

    struct NoopListener;

    impl SendListener for NoopListener {}

    #[test]
    fn フェーズ名は慣例の文字列になる() {
        assert_eq!(SendPhase::BeforeSendPerformed.to_string(), "beforeSendPerformed");
        assert_eq!(SendPhase::SendPerformed.to_string(), "sendPerformed");
    }

    #[test]
    fn 新しいイベントは未確定で失敗宛先なし() {
        let message = Message::new();
        let event = SendEvent::new("test", &message);

        assert_eq!(event.result(), SendResult::Pending);
        assert!(event.failed_recipients().is_empty());
        assert!(!event.bubble_cancelled());
        assert_eq!(event.transport(), "test");
    }

    #[test]
    fn リスナーは登録順に通知される() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = ListenerDispatcher::new();
        for label in ["first", "second"] {
            dispatcher.bind_event_listener(Arc::new(OrderListener {
                label,
                log: log.clone(),
                cancel: false,
            }));
        }
        let message = Message::new();
        let mut event = dispatcher.create_send_event("test", &message).unwrap();

        dispatcher.dispatch_event(&mut event, SendPhase::BeforeSendPerformed);
        event.set_result(SendResult::Success);
        dispatcher.dispatch_event(&mut event, SendPhase::SendPerformed);

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "before:first",
                "before:second",
                "after:first:success",
                "after:second:success"
            ]
        );
    }

    #[test]
    fn キャンセルは後続のリスナーにも見える() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = ListenerDispatcher::new();
        dispatcher.bind_event_listener(Arc::new(OrderListener {
            label:  "canceller",
            log:    log.clone(),
            cancel: true,
        }));
        dispatcher.bind_event_listener(Arc::new(OrderListener {
            label:  "observer",
            log:    log.clone(),
            cancel: false,
        }));
        let message = Message::new();
        let mut event = dispatcher.create_send_event("test", &message).unwrap();

        dispatcher.dispatch_event(&mut event, SendPhase::BeforeSendPerformed);

        assert!(event.bubble_cancelled());
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn 通知中にリスナーを登録してもデッドロックしない() {
        let dispatcher = ListenerDispatcher::new();
        dispatcher.bind_event_listener(Arc::new(RegisteringListener {
            dispatcher: dispatcher.clone(),
        }));
        let message = Message::new();
        let mut event = dispatcher.create_send_event("test", &message).unwrap();

        dispatcher.dispatch_event(&mut event, SendPhase::BeforeSendPerformed);

        assert_eq!(dispatcher.listener_count(), 2);
    }

    #[test]
    fn noop_dispatcherはイベントを作成しない() {
        let dispatcher = NoopEventDispatcher;
        dispatcher.bind_event_listener(Arc::new(NoopListener));
        let message = Message::new();

        assert!(dispatcher.create_send_event("test", &message).is_none());
    }
}
