//! 填写步骤 - 流程层
//!
//! 测试步骤调用的入口：绑定 → 全部填写 → 回读校验

use std::fmt::Display;

use tracing::{info, warn};

use crate::binder::{DynamicFieldBinder, QuestionLayout};
use crate::driver::PageDriver;
use crate::error::BinderResult;

/// 一次填写步骤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// 按页面顺序发现的字段名
    pub names: Vec<String>,
    /// 成功写入的字段数
    pub filled: usize,
    /// 回读值与写入值不一致的字段
    pub mismatched: Vec<String>,
}

impl StepReport {
    /// 所有字段都已写入且回读一致
    pub fn is_complete(&self) -> bool {
        self.filled == self.names.len() && self.mismatched.is_empty()
    }
}

impl Display for StepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[字段 {} 个 写入 {} 个 不一致 {} 个]",
            self.names.len(),
            self.filled,
            self.mismatched.len()
        )
    }
}

/// 填写步骤
///
/// - 不持有页面资源，每次运行都借用驱动
/// - 不缓存字段名，每次运行都重新发现
/// - 错误原样返回给调用方
pub struct FillStep {
    layout: QuestionLayout,
    fill_value: String,
}

impl FillStep {
    pub fn new(layout: QuestionLayout, fill_value: impl Into<String>) -> Self {
        Self {
            layout,
            fill_value: fill_value.into(),
        }
    }

    pub async fn run<D: PageDriver>(&self, driver: &D) -> BinderResult<StepReport> {
        let binder = DynamicFieldBinder::new(driver, self.layout.clone());

        let filled = binder.bind_and_fill_all(&self.fill_value).await?;
        info!("✓ 已写入 {} 个字段", filled);

        let binding = binder.bind().await?;
        let mismatched: Vec<String> = binding
            .values()
            .await?
            .into_iter()
            .filter(|(_, value)| *value != self.fill_value)
            .map(|(name, _)| name)
            .collect();

        if !mismatched.is_empty() {
            warn!("⚠️ {} 个字段回读不一致: {:?}", mismatched.len(), mismatched);
        }

        Ok(StepReport {
            names: binding.names(),
            filled,
            mismatched,
        })
    }
}
