//! 统一错误处理模块
//!
//! 提供翻译请求的错误分类：HTTP状态失败、传输失败、响应解析失败，
//! 以及配置错误和内部错误

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

// 本地模块导入
use crate::api_constants::error_messages;

/// 翻译请求统一错误类型
///
/// 控制器只把它转换成可展示的字符串，不会向渲染层传播
#[derive(Debug)]
pub enum TranslationError {
    /// 服务可达，但返回了非成功状态码
    Http {
        /// HTTP状态码
        status: u16,
    },

    /// 请求未能完成（连接被拒绝、DNS失败、连接中断、超时）
    Transport {
        /// 底层错误描述
        description: String,
    },

    /// 成功状态下响应体格式错误
    Parse {
        /// 解析错误详情
        details: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl TranslationError {
    /// HTTP失败时的状态码
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TranslationError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Http { status } => {
                write!(f, "{}: {}", error_messages::HTTP_FAILURE, status)
            }
            TranslationError::Transport { description } => write!(f, "{}", description),
            TranslationError::Parse { details } => {
                write!(f, "{}: {}", error_messages::PARSE_FAILURE, details)
            }
            TranslationError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            TranslationError::Internal { source } => write!(f, "内部处理错误: {}", source),
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslationError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// 翻译结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (http, $status:expr) => {
        $crate::error::TranslationError::Http { status: $status }
    };
    (transport, $desc:expr) => {
        $crate::error::TranslationError::Transport {
            description: $desc.to_string(),
        }
    };
    (parse, $details:expr) => {
        $crate::error::TranslationError::Parse {
            details: $details.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从anyhow::Error转换为TranslationError
impl From<AnyhowError> for TranslationError {
    fn from(error: AnyhowError) -> Self {
        TranslationError::Internal { source: error }
    }
}

/// 从reqwest::Error转换为TranslationError
///
/// 带状态码的错误归为HTTP失败，解码错误归为解析失败，其余归为传输失败
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return TranslationError::Http {
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return TranslationError::Parse {
                details: error.to_string(),
            };
        }
        TranslationError::Transport {
            description: transport_description(&error),
        }
    }
}

/// 从serde_json::Error转换为TranslationError
impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::Parse {
            details: error.to_string(),
        }
    }
}

/// 拼接reqwest错误及其底层原因，便于用户看到真实的故障（如 Connection refused）
fn transport_description(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
