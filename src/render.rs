//! 终端渲染层：快照到文本的纯函数

use crate::api_constants::ui_text;
use crate::controller::{RequestState, Snapshot};

/// 渲染触发按钮
pub fn render_trigger(snapshot: &Snapshot) -> String {
    let label = if snapshot.state.is_in_flight() {
        ui_text::TRIGGER_BUSY
    } else {
        ui_text::TRIGGER_IDLE
    };
    if snapshot.trigger_enabled() {
        format!("[ {} ]", label)
    } else {
        format!("[ {} ] (不可用)", label)
    }
}

/// 渲染整个界面
///
/// 错误区和结果区不会同时出现；关键词为空时不渲染关键词区
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&render_trigger(snapshot));
    out.push('\n');

    match &snapshot.state {
        RequestState::Failed(message) => {
            out.push_str(&format!("❌ {}\n", message));
        }
        RequestState::Succeeded(result) => {
            out.push('\n');
            out.push_str(ui_text::RESULT_HEADING);
            out.push('\n');
            out.push_str(&result.translation);
            out.push('\n');

            if result.has_keywords() {
                out.push('\n');
                out.push_str(ui_text::KEYWORDS_HEADING);
                out.push('\n');
                let tags: Vec<String> = result.keywords.iter().map(|k| format!("#{}", k)).collect();
                out.push_str(&tags.join("  "));
                out.push('\n');
            }
        }
        RequestState::Idle | RequestState::InFlight => {}
    }

    out
}
