//! 题目行布局
//!
//! 题目行的 name 属性在所有行之间共享，不能用来区分行，
//! 所以只用结构位置（选择器 + 序号）定位。

use std::fmt::Display;
use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::error::ConfigError;

/// 单个题目行的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLocator {
    pub selector: String,
    pub index: usize,
}

impl Display for GroupLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.selector, self.index)
    }
}

/// 页面上固定数量的题目行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionLayout {
    group_selector: String,
    indices: Vec<usize>,
    input_selector: String,
}

/// TOML 中的布局定义，`indices` 优先于 `group_count`
#[derive(Debug, Deserialize)]
struct LayoutFile {
    group_selector: String,
    #[serde(default)]
    indices: Option<Vec<usize>>,
    #[serde(default)]
    group_count: Option<usize>,
    #[serde(default = "default_input_selector")]
    input_selector: String,
}

fn default_input_selector() -> String {
    "input".to_string()
}

impl QuestionLayout {
    /// 创建布局，题目行序号为 `0..group_count`
    pub fn new(group_selector: impl Into<String>, group_count: usize) -> Self {
        Self {
            group_selector: group_selector.into(),
            indices: (0..group_count).collect(),
            input_selector: default_input_selector(),
        }
    }

    /// 使用显式序号创建布局
    pub fn with_indices(group_selector: impl Into<String>, indices: Vec<usize>) -> Self {
        Self {
            group_selector: group_selector.into(),
            indices,
            input_selector: default_input_selector(),
        }
    }

    /// 设置行内输入框选择器
    pub fn with_input_selector(mut self, selector: impl Into<String>) -> Self {
        self.input_selector = selector.into();
        self
    }

    pub fn group_selector(&self) -> &str {
        &self.group_selector
    }

    pub fn input_selector(&self) -> &str {
        &self.input_selector
    }

    /// 题目行数量
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// 按页面顺序遍历题目行位置
    pub fn groups(&self) -> impl Iterator<Item = GroupLocator> + '_ {
        self.indices.iter().map(|&index| GroupLocator {
            selector: self.group_selector.clone(),
            index,
        })
    }

    /// 检查布局是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_selector.trim().is_empty() {
            return Err(ConfigError::InvalidLayout("题目行选择器不能为空".to_string()));
        }
        if self.input_selector.trim().is_empty() {
            return Err(ConfigError::InvalidLayout("输入框选择器不能为空".to_string()));
        }
        if self.indices.is_empty() {
            return Err(ConfigError::InvalidLayout("至少需要一个题目行".to_string()));
        }
        Ok(())
    }

    /// 从 TOML 文本解析布局
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: LayoutFile = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;

        let indices = match (file.indices, file.group_count) {
            (Some(indices), _) => indices,
            (None, Some(count)) => (0..count).collect(),
            (None, None) => {
                return Err(ConfigError::InvalidLayout(
                    "需要指定 indices 或 group_count".to_string(),
                ))
            }
        };

        let layout = Self {
            group_selector: file.group_selector,
            indices,
            input_selector: file.input_selector,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// 从 TOML 文件加载布局
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::ReadFailed {
                path: origin.clone(),
                source,
            })?;
        Self::from_toml_str(&content, &origin)
    }
}

impl Default for QuestionLayout {
    fn default() -> Self {
        Self::new(".answer_row", 3)
    }
}
