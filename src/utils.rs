use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use crate::api_constants::ui_text;

/// 初始化日志系统
///
/// 日志输出到stderr，避免与渲染结果混在一起
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 按行读取的输入源
///
/// 每一行视为一次输入变更加一次触发，读到EOF或退出命令时结束
pub struct LineInputSource<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> LineInputSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// 读取下一段输入，`None` 表示会话结束
    pub async fn next_text(&mut self) -> Result<Option<String>> {
        let line = self.lines.next_line().await.context("读取输入失败")?;
        match line {
            Some(line) if line.trim() == ui_text::QUIT_COMMAND => {
                debug!("收到退出命令");
                Ok(None)
            }
            Some(line) => Ok(Some(line.trim_end_matches('\r').to_string())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_input_source() {
        let input: &[u8] = "你好\r\n\n  世界  \n:q\n之后的内容\n".as_bytes();
        let mut source = LineInputSource::new(input);

        assert_eq!(source.next_text().await.unwrap(), Some("你好".to_string()));
        assert_eq!(source.next_text().await.unwrap(), Some(String::new()));
        assert_eq!(source.next_text().await.unwrap(), Some("  世界  ".to_string()));
        assert_eq!(source.next_text().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_line_input_source_eof() {
        let input: &[u8] = b"";
        let mut source = LineInputSource::new(input);
        assert_eq!(source.next_text().await.unwrap(), None);
    }
}
