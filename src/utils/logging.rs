/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::RunSummary;

/// 初始化 tracing 订阅者
///
/// `RUST_LOG` 优先；否则 `verbose` 为真时输出 debug 级别。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 先修/同修逻辑树解析 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 课程文件: {}", config.courses_file);
    info!("🤖 模型: {}", config.llm_model_name);
    info!("⏱️ 请求间隔: {} 秒", config.request_delay_secs);
    if config.overwrite {
        info!("♻️ 覆盖模式: 已解析的课程也会重新处理");
    }
    info!("{}", "=".repeat(60));
}

/// 记录课程加载信息
pub fn log_courses_loaded(total: usize, known_failures: usize) {
    info!("✓ 找到 {} 门课程", total);
    if known_failures > 0 {
        info!("📋 以往运行中失败的课程: {} 门，将被跳过", known_failures);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    if summary.interrupted {
        warn!("⚠️ 运行被中断: 已处理 {}/{}", summary.visited(), summary.total);
    }
    info!("✅ 成功: {}", summary.processed);
    info!("⏭️ 跳过: {}", summary.skipped);
    info!("➖ 无需求: {}", summary.empty);
    info!(
        "❌ 失败: {} (本次新增 {})",
        summary.all_failed.len(),
        summary.failed.len()
    );
    for id in &summary.all_failed {
        info!("   - {}", id);
    }
    info!("{}", "=".repeat(60));
    info!("\n课程已保存至: {}", config.courses_file);
    info!("失败记录已保存至: {}", config.failure_log_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
