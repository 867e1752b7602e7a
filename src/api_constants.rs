/// 翻译服务相关常量配置
///
/// 该文件定义了翻译服务地址、超时以及界面文案等常量，方便统一管理和维护

/// 默认翻译API配置
pub mod api_config {
    /// 默认翻译API地址（本地后端服务）
    pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/translate";

    /// 默认User-Agent
    pub const DEFAULT_USER_AGENT: &str = "trans-web/0.1.0";

    /// 请求体中的文本字段名
    pub const TEXT_FIELD: &str = "text";
}

/// 界面文案常量
pub mod ui_text {
    /// 标题
    pub const TITLE: &str = "🤖 AI 智能翻译助手";

    /// 触发按钮（可用）
    pub const TRIGGER_IDLE: &str = "开始翻译";

    /// 触发按钮（请求中）
    pub const TRIGGER_BUSY: &str = "翻译中...";

    /// 结果区标题
    pub const RESULT_HEADING: &str = "翻译结果：";

    /// 关键词区标题
    pub const KEYWORDS_HEADING: &str = "关键词提取：";

    /// 交互模式提示
    pub const INPUT_PROMPT: &str = "请输入中文内容（:q 退出）";

    /// 交互模式退出命令
    pub const QUIT_COMMAND: &str = ":q";
}

/// 错误消息常量
pub mod error_messages {
    /// 所有失败消息的固定前缀
    pub const FAILURE_PREFIX: &str = "翻译出错，请检查后端是否启动。";

    /// HTTP状态失败的消息前缀
    pub const HTTP_FAILURE: &str = "请求失败";

    /// 响应体解析失败
    pub const PARSE_FAILURE: &str = "响应解析失败";
}

/// 获取API URL，自定义地址为空时回落到默认地址
pub fn get_api_url(custom_api: Option<&str>) -> &str {
    match custom_api {
        Some(custom) if !custom.trim().is_empty() => custom,
        _ => api_config::DEFAULT_API_URL,
    }
}

/// 验证API URL是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_selection() {
        assert_eq!(get_api_url(None), api_config::DEFAULT_API_URL);
        assert_eq!(get_api_url(Some("  ")), api_config::DEFAULT_API_URL);
        assert_eq!(
            get_api_url(Some("http://custom.api/translate")),
            "http://custom.api/translate"
        );
    }

    #[test]
    fn test_api_url_validation() {
        assert!(is_valid_api_url("https://example.com/translate"));
        assert!(is_valid_api_url("http://127.0.0.1:8000/translate"));
        assert!(!is_valid_api_url("ftp://example.com"));
        assert!(!is_valid_api_url("invalid-url"));
    }
}
