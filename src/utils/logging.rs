//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::binder::QuestionLayout;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info 级别。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `target_url`: 目标页面
/// - `layout`: 题目行布局
pub fn log_startup(target_url: &str, layout: &QuestionLayout) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 目标页面: {}", target_url);
    info!(
        "📋 题目行: {} × {} (输入框: {})",
        layout.group_selector(),
        layout.len(),
        layout.input_selector()
    );
    info!("{}", "=".repeat(60));
}

/// 记录发现的字段名
pub fn log_discovered(names: &[String]) {
    info!("✓ 发现 {} 个动态字段", names.len());
    for (i, name) in names.iter().enumerate() {
        info!("  {}. {}", i + 1, truncate_text(name, 40));
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `filled`: 成功写入数量
/// - `total`: 发现的字段总数
/// - `mismatched`: 回读不一致的字段
pub fn print_final_stats(filled: usize, total: usize, mismatched: &[String]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 填写完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 写入: {}/{}", filled, total);
    if mismatched.is_empty() {
        info!("✅ 回读全部一致");
    } else {
        warn!("❌ 回读不一致: {}", mismatched.join(", "));
    }
    info!("{}", "=".repeat(60));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("题目行选择器", 3), "题目行...");
        assert_eq!(truncate_text("car__1", 10), "car__1");
    }
}
