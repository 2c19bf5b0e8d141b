use thiserror::Error;

/// 绑定器错误类型
#[derive(Debug, Error)]
pub enum BinderError {
    /// 页面结构与预期不符
    #[error("页面状态错误: {0}")]
    PageState(#[from] PageStateError),

    /// 已发现的字段名在写入时无法解析为活动元素
    ///
    /// 元素已脱离页面时 `source` 为空；解析过程中驱动出错时带上驱动错误
    #[error("无法解析字段 '{name}' (已成功填写 {filled} 个字段)")]
    ElementResolution {
        name: String,
        filled: usize,
        #[source]
        source: Option<DriverError>,
    },

    /// 绑定表中不存在该字段名
    #[error("字段 '{name}' 不在本次绑定中")]
    UnknownField { name: String },

    /// 写入字段时驱动失败
    #[error("写入字段 '{name}' 失败 (已成功填写 {filled} 个字段): {source}")]
    Write {
        name: String,
        filled: usize,
        #[source]
        source: DriverError,
    },

    /// 驱动层错误
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// 页面状态错误
///
/// 动态字段名只在一次页面加载内有效，这类错误不做重试，直接交给调用方。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageStateError {
    /// 找不到题目行
    #[error("找不到题目行 {selector}[{index}]")]
    GroupNotFound { selector: String, index: usize },

    /// 同一页面上出现重复的字段名
    #[error("字段名 '{name}' 重复出现 (第 {first_group} 行与第 {second_group} 行)")]
    DuplicateFieldName {
        name: String,
        first_group: usize,
        second_group: usize,
    },

    /// 输入框缺少 name 属性
    #[error("题目行 {selector}[{index}] 中第 {position} 个输入框没有 name 属性")]
    UnnamedInput {
        selector: String,
        index: usize,
        position: usize,
    },
}

/// 驱动层错误
///
/// 包装具体自动化后端（CDP、内存页面等）返回的错误
#[derive(Debug, Error)]
#[error("驱动操作 {operation} 失败: {source}")]
pub struct DriverError {
    pub operation: &'static str,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl DriverError {
    /// 创建驱动错误
    pub fn new(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::new("json", err)
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取布局文件失败
    #[error("读取布局文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 布局定义不合法
    #[error("布局定义不合法: {0}")]
    InvalidLayout(String),
}

// ========== 便捷构造函数 ==========

impl BinderError {
    /// 创建题目行缺失错误
    pub fn group_not_found(selector: impl Into<String>, index: usize) -> Self {
        BinderError::PageState(PageStateError::GroupNotFound {
            selector: selector.into(),
            index,
        })
    }

    /// 创建字段解析失败错误（元素已脱离页面）
    pub fn element_resolution(name: impl Into<String>, filled: usize) -> Self {
        BinderError::ElementResolution {
            name: name.into(),
            filled,
            source: None,
        }
    }

    /// 创建字段解析失败错误（解析时驱动出错）
    pub fn element_resolution_failed(name: impl Into<String>, filled: usize, source: DriverError) -> Self {
        BinderError::ElementResolution {
            name: name.into(),
            filled,
            source: Some(source),
        }
    }

    /// 已成功写入的字段数（仅写入类错误有意义）
    pub fn filled(&self) -> Option<usize> {
        match self {
            BinderError::ElementResolution { filled, .. } | BinderError::Write { filled, .. } => {
                Some(*filled)
            }
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 绑定器结果类型
pub type BinderResult<T> = Result<T, BinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_group() {
        let err = BinderError::group_not_found(".answer_row", 2);
        assert_eq!(err.to_string(), "页面状态错误: 找不到题目行 .answer_row[2]");
    }

    #[test]
    fn filled_count_only_reported_for_write_errors() {
        assert_eq!(BinderError::element_resolution("car__1", 3).filled(), Some(3));
        assert_eq!(BinderError::group_not_found(".answer_row", 0).filled(), None);
    }

    #[test]
    fn resolution_failure_keeps_driver_error_as_source() {
        use std::error::Error;

        let err = BinderError::element_resolution_failed(
            "car__1",
            0,
            DriverError::new("resolve_field", "node detached"),
        );
        assert_eq!(err.filled(), Some(0));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("驱动操作 resolve_field 失败: node detached"));

        assert!(BinderError::element_resolution("car__1", 0).source().is_none());
    }
}
