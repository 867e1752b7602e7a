//! 翻译请求控制器
//!
//! 持有输入文本和请求状态，`submit()` 是唯一的状态迁移入口：
//!
//! ```text
//! Idle | Succeeded | Failed --submit(非空输入)--> InFlight
//! InFlight --成功--> Succeeded
//! InFlight --失败--> Failed
//! ```
//!
//! 状态保存在 `tokio::sync::watch` 通道中，渲染层通过 [`TranslationRequestController::subscribe`]
//! 观察每一次迁移。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api_constants::error_messages;
use crate::stats::{format_duration, SessionStats};
use crate::translator::{RemoteTranslator, TranslationResult};

/// 请求状态，同一时刻只有一个生效
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(TranslationResult),
    Failed(String),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// 成功时的翻译结果
    pub fn result(&self) -> Option<&TranslationResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// 失败时的错误消息
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 状态标签，用于日志
    pub fn tag(&self) -> &'static str {
        match self {
            RequestState::Idle => "Idle",
            RequestState::InFlight => "InFlight",
            RequestState::Succeeded(_) => "Succeeded",
            RequestState::Failed(_) => "Failed",
        }
    }
}

/// 控制器对外暴露的只读快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub input: String,
    pub state: RequestState,
    pub stats: SessionStats,
}

impl Snapshot {
    /// 触发按钮是否可用：不在请求中且输入去空白后非空
    pub fn trigger_enabled(&self) -> bool {
        !self.state.is_in_flight() && !self.input.trim().is_empty()
    }
}

/// 提交被忽略的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 输入为空或只有空白
    EmptyInput,
    /// 已有请求在进行中
    InFlight,
}

/// 一次 `submit()` 调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Skipped(SkipReason),
    Succeeded,
    Failed,
}

/// 翻译请求控制器
pub struct TranslationRequestController<T> {
    translator: T,
    state: watch::Sender<Snapshot>,
    next_request_id: AtomicU64,
}

impl<T: RemoteTranslator> TranslationRequestController<T> {
    pub fn new(translator: T) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            translator,
            state,
            next_request_id: AtomicU64::new(1),
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn input(&self) -> String {
        self.state.borrow().input.clone()
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().state.clone()
    }

    pub fn stats(&self) -> SessionStats {
        self.state.borrow().stats.clone()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.state.borrow().trigger_enabled()
    }

    /// 输入源的变更回调，只替换输入文本
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|snapshot| {
            if snapshot.input == text {
                return false;
            }
            snapshot.input = text;
            true
        });
    }

    /// 提交当前输入进行翻译
    ///
    /// 输入为空或已有请求进行中时不做任何事。否则在发出请求之前进入 `InFlight`
    /// 并清除上一次的结果或错误，请求结算后进入 `Succeeded` 或 `Failed`。
    /// 不重试，也不设置超时；超时由翻译服务客户端负责。
    pub async fn submit(&self) -> SubmitOutcome {
        let mut skipped = None;
        let mut text = String::new();

        // 检查与进入InFlight在同一次修改中完成，重叠的提交会被忽略
        self.state.send_if_modified(|snapshot| {
            let reason = if snapshot.input.trim().is_empty() {
                Some(SkipReason::EmptyInput)
            } else if snapshot.state.is_in_flight() {
                Some(SkipReason::InFlight)
            } else {
                None
            };

            if let Some(reason) = reason {
                snapshot.stats.record_skipped();
                skipped = Some(reason);
                return false;
            }

            snapshot.state = RequestState::InFlight;
            text = snapshot.input.clone();
            true
        });

        if let Some(reason) = skipped {
            debug!("忽略提交: {:?}", reason);
            return SubmitOutcome::Skipped(reason);
        }

        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        info!("🚀 提交翻译请求 #{} ({} 字符)", request_id, text.chars().count());

        let started = Instant::now();
        let result = self.translator.translate(&text).await;
        let latency = started.elapsed();

        let (settled, outcome) = match result {
            Ok(result) => {
                info!(
                    "✅ 请求 #{} 完成: {} 个关键词，耗时 {}",
                    request_id,
                    result.keywords.len(),
                    format_duration(latency)
                );
                (RequestState::Succeeded(result), SubmitOutcome::Succeeded)
            }
            Err(e) => {
                warn!("❌ 请求 #{} 失败: {}", request_id, e);
                let message = format!("{}{}", error_messages::FAILURE_PREFIX, e);
                (RequestState::Failed(message), SubmitOutcome::Failed)
            }
        };

        self.state.send_modify(|snapshot| {
            snapshot
                .stats
                .record_settled(outcome == SubmitOutcome::Succeeded, latency);
            snapshot.state = settled;
        });

        outcome
    }
}
