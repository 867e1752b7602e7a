//! 远程翻译服务模块
//!
//! 定义翻译结果类型、远程翻译接口以及基于reqwest的HTTP实现

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ControllerConfig;
use crate::error::{Result, TranslationError};

/// 翻译结果：译文与按服务返回顺序排列的关键词
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationResult {
    pub translation: String,
    pub keywords: Vec<String>,
}

impl TranslationResult {
    pub fn new(translation: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            translation: translation.into(),
            keywords,
        }
    }

    /// 是否有可展示的关键词
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

impl From<TranslateResponse> for TranslationResult {
    fn from(body: TranslateResponse) -> Self {
        Self {
            translation: body.translation,
            keywords: body.keywords.unwrap_or_default(),
        }
    }
}

/// 解析成功响应体
pub fn parse_response_body(body: &str) -> Result<TranslationResult> {
    let parsed: TranslateResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

/// 远程翻译服务接口
///
/// 每次调用恰好发出一次请求，不做重试
#[async_trait]
pub trait RemoteTranslator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<TranslationResult>;
}

/// 基于HTTP POST的翻译服务客户端
pub struct HttpTranslator {
    client: Client,
    api_url: String,
    user_agent: String,
}

impl HttpTranslator {
    /// 根据配置创建客户端
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TranslationError::Configuration {
            field: "http_client".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_url: config.api_url().to_string(),
            user_agent: config.user_agent().to_string(),
        })
    }

    /// 获取API地址
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl RemoteTranslator for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<TranslationResult> {
        debug!("发送翻译请求: {} ({} 字节)", self.api_url, text.len());

        let response = self
            .client
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .json(&TranslateRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("翻译API返回错误状态: {}", status);
            return Err(TranslationError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_response_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 启动一个只响应一次的HTTP服务，返回地址和收到的原始请求
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            // 客户端可能在读到状态行后就关闭连接
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}/translate", addr), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn translator_for(url: &str) -> HttpTranslator {
        HttpTranslator::new(&ControllerConfig::new().with_api_url(url)).unwrap()
    }

    #[test]
    fn test_parse_response_body() {
        let result = parse_response_body(r#"{"translation":"T","keywords":["a","b"]}"#).unwrap();
        assert_eq!(result, TranslationResult::new("T", vec!["a".into(), "b".into()]));

        let result = parse_response_body(r#"{"translation":"T"}"#).unwrap();
        assert!(!result.has_keywords());

        let result = parse_response_body(r#"{"translation":"","keywords":null}"#).unwrap();
        assert_eq!(result, TranslationResult::default());
    }

    #[test]
    fn test_parse_response_body_malformed() {
        assert!(matches!(
            parse_response_body("<html>oops</html>"),
            Err(TranslationError::Parse { .. })
        ));
        assert!(matches!(
            parse_response_body(r#"{"keywords":["a"]}"#),
            Err(TranslationError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ControllerConfig::new().with_api_url("ftp://example.com");
        assert!(HttpTranslator::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_translate_success() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"translation":"AI will change how we work","keywords":["AI","work","change"]}"#,
        )
        .await;

        let result = translator_for(&url).translate("人工智能将彻底改变我们的工作方式").await.unwrap();
        assert_eq!(result.translation, "AI will change how we work");
        assert_eq!(result.keywords, vec!["AI", "work", "change"]);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /translate"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#"{"text":"人工智能将彻底改变我们的工作方式"}"#));
    }

    #[tokio::test]
    async fn test_translate_http_failure() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;

        let err = translator_for(&url).translate("你好").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("500"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_translate_malformed_body() {
        let (url, server) = serve_once("200 OK", "not json").await;

        let err = translator_for(&url).translate("你好").await.unwrap_err();
        assert!(matches!(err, TranslationError::Parse { .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_translate_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = translator_for(&format!("http://{}/translate", addr))
            .translate("你好")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::Transport { .. }));
        assert!(!err.to_string().is_empty());
    }
}
