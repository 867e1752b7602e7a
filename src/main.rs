use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, error, info};

use trans_web::api_constants::ui_text;
use trans_web::config::Cli;
use trans_web::render::render;
use trans_web::stats::print_session_stats;
use trans_web::utils::{init_logging, LineInputSource};
use trans_web::{HttpTranslator, SubmitOutcome, TranslationRequestController};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    let config = cli.controller_config();
    let translator = HttpTranslator::new(&config).context("创建翻译服务客户端失败")?;

    if !cli.quiet {
        info!("🚀 {}", ui_text::TITLE);
        info!("🌐 翻译服务: {}", translator.api_url());
    }

    let controller = Arc::new(TranslationRequestController::new(translator));
    spawn_state_logger(&controller);

    let all_succeeded = match &cli.text {
        Some(text) => run_once(&controller, text).await,
        None => run_interactive(&controller).await?,
    };

    if cli.stats {
        print_session_stats(&controller.stats());
    }

    if !all_succeeded {
        error!("❌ 翻译失败");
        std::process::exit(1);
    }

    Ok(())
}

/// 一次性模式：提交命令行给出的文本
async fn run_once(controller: &TranslationRequestController<HttpTranslator>, text: &str) -> bool {
    controller.set_input(text);
    let outcome = controller.submit().await;
    print!("{}", render(&controller.snapshot()));
    !matches!(outcome, SubmitOutcome::Failed)
}

/// 交互模式：每行标准输入作为一次输入并触发翻译
async fn run_interactive(
    controller: &TranslationRequestController<HttpTranslator>,
) -> Result<bool> {
    let mut source = LineInputSource::new(BufReader::new(tokio::io::stdin()));
    let mut all_succeeded = true;

    println!("{}", ui_text::INPUT_PROMPT);
    while let Some(text) = source.next_text().await? {
        controller.set_input(text);
        if !controller.trigger_enabled() {
            debug!("输入为空，跳过");
            continue;
        }

        if controller.submit().await == SubmitOutcome::Failed {
            all_succeeded = false;
        }
        println!("{}", render(&controller.snapshot()));
    }

    Ok(all_succeeded)
}

/// 订阅状态变化并记录每一次迁移
fn spawn_state_logger(controller: &Arc<TranslationRequestController<HttpTranslator>>) {
    let mut rx = controller.subscribe();
    tokio::spawn(async move {
        let mut last = rx.borrow_and_update().state.tag();
        while rx.changed().await.is_ok() {
            let tag = rx.borrow_and_update().state.tag();
            if tag != last {
                debug!("状态迁移: {} -> {}", last, tag);
                last = tag;
            }
        }
    });
}
