use std::path::Path;

use crate::binder::QuestionLayout;
use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标URL
    pub target_url: String,
    /// 连接已有浏览器时，优先复用标题包含该文本的页面
    pub target_title: Option<String>,
    /// 不连接已有浏览器，直接启动无头浏览器
    pub headless: bool,
    /// 无头模式下使用的浏览器可执行文件，为空时由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    // --- 题目行布局 ---
    pub group_selector: String,
    pub group_count: usize,
    pub input_selector: String,
    /// 布局文件，存在时覆盖上面三项
    pub layout_file: Option<String>,
    /// 写入每个字段的值
    pub fill_value: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "http://localhost:3000/questions".to_string(),
            target_title: None,
            headless: false,
            chrome_executable: None,
            group_selector: ".answer_row".to_string(),
            group_count: 3,
            input_selector: "input".to_string(),
            layout_file: None,
            fill_value: "X".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            target_title: std::env::var("TARGET_TITLE").ok().filter(|v| !v.is_empty()).or(default.target_title),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().filter(|v| !v.is_empty()).or(default.chrome_executable),
            group_selector: std::env::var("GROUP_SELECTOR").unwrap_or(default.group_selector),
            group_count: std::env::var("GROUP_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.group_count),
            input_selector: std::env::var("INPUT_SELECTOR").unwrap_or(default.input_selector),
            layout_file: std::env::var("LAYOUT_FILE").ok().filter(|v| !v.is_empty()).or(default.layout_file),
            fill_value: std::env::var("FILL_VALUE").unwrap_or(default.fill_value),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 得到题目行布局，优先使用布局文件
    pub async fn layout(&self) -> Result<QuestionLayout, ConfigError> {
        if let Some(path) = &self.layout_file {
            return QuestionLayout::load(Path::new(path)).await;
        }
        let layout = QuestionLayout::new(&self.group_selector, self.group_count)
            .with_input_selector(&self.input_selector);
        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn default_layout_matches_answer_rows() {
        let layout = block_on(Config::default().layout()).unwrap();
        assert_eq!(layout, QuestionLayout::default());
    }

    #[test]
    fn zero_groups_is_rejected() {
        let config = Config {
            group_count: 0,
            ..Config::default()
        };
        assert!(matches!(block_on(config.layout()), Err(ConfigError::InvalidLayout(_))));
    }

    #[test]
    fn missing_layout_file_is_a_read_error() {
        let config = Config {
            layout_file: Some("does/not/exist.toml".to_string()),
            ..Config::default()
        };
        assert!(matches!(block_on(config.layout()), Err(ConfigError::ReadFailed { .. })));
    }
}
