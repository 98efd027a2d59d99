//! 日志工具模块
//!
//! 提供日志初始化和启动信息输出的辅助函数

use crate::config::Config;
use crate::models::TriviaBank;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则为 `info`（`verbose` 时为 `debug`）。
/// 日志写到 stderr，stdout 只输出响应。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 题库服务启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 题库文件: {}", config.data_file);
    info!("📄 每页题目数: {}", config.questions_per_page);
    info!(
        "💾 写操作回写: {}",
        if config.persist_writes { "开启" } else { "关闭" }
    );
    if let Some(seed) = config.quiz_seed {
        info!("🎲 抽题种子: {}", seed);
    }
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
pub fn log_bank_loaded(bank: &TriviaBank) {
    info!(
        "✓ 已加载 {} 个分类，{} 道题目",
        bank.categories.len(),
        bank.questions.len()
    );
}

/// 打印最终统计信息
pub fn print_final_stats(handled: usize, failed: usize) {
    info!("{}", "─".repeat(60));
    info!("📊 共处理请求 {} 个，其中失败 {} 个", handled, failed);
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
