//! 配置管理模块
//!
//! 提供CLI参数解析和翻译服务配置管理功能

// 标准库导入
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{self, api_config};
use crate::error::{Result, TranslationError};

/// 翻译服务配置结构体
///
/// 支持Builder模式进行链式配置。超时默认不设置，由传输层默认行为决定。
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use trans_web::config::ControllerConfig;
///
/// let config = ControllerConfig::new()
///     .with_api_url("http://localhost:8000/translate")
///     .with_timeout(Some(Duration::from_secs(10)));
/// assert_eq!(config.api_url(), "http://localhost:8000/translate");
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// 翻译API服务地址
    api_url: String,
    /// 请求超时
    timeout: Option<Duration>,
    /// User-Agent
    user_agent: String,
}

impl ControllerConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - API地址: 本地后端服务
    /// - 超时: 不设置
    /// - User-Agent: trans-web/0.1.0
    pub fn new() -> Self {
        Self {
            api_url: api_config::DEFAULT_API_URL.to_string(),
            timeout: None,
            user_agent: api_config::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// 获取API地址
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 获取请求超时
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// 获取User-Agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 设置API地址
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// 设置请求超时
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 设置User-Agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !api_constants::is_valid_api_url(&self.api_url) {
            return Err(TranslationError::Configuration {
                field: "api_url".to_string(),
                reason: format!("不是有效的HTTP地址: {}", self.api_url),
            });
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(crate::translation_error!(config, "timeout", "超时时间必须大于0"));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "AI智能翻译助手 - 将中文翻译成英文并提取关键词", long_about = None)]
pub struct Cli {
    /// 待翻译文本（一次性模式；不指定时从标准输入逐行读取）
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// 翻译API地址
    #[arg(short, long, default_value = api_config::DEFAULT_API_URL)]
    pub api: String,

    /// 请求超时时间（秒，默认不限制）
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// 自定义User-Agent
    #[arg(long)]
    pub user_agent: Option<String>,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出结果)
    #[arg(short, long)]
    pub quiet: bool,

    /// 退出时显示会话统计
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// 根据命令行参数生成服务配置
    pub fn controller_config(&self) -> ControllerConfig {
        let config = ControllerConfig::new()
            .with_api_url(api_constants::get_api_url(Some(&self.api)))
            .with_timeout(self.timeout.map(Duration::from_secs));

        match &self.user_agent {
            Some(ua) => config.with_user_agent(ua),
            None => config,
        }
    }
}
