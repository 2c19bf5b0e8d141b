//! 动态字段绑定器
//!
//! 先发现、再操作：每次调用都重新读取页面，不缓存任何字段名。

use tracing::debug;

use crate::binder::field_binding::FieldBinding;
use crate::binder::question_group::QuestionLayout;
use crate::driver::PageDriver;
use crate::error::{BinderError, BinderResult, PageStateError};

/// 动态字段绑定器
///
/// 职责：
/// - 按布局顺序遍历题目行，读取行内输入框的运行时 name
/// - 构建名称 → 元素的绑定表
/// - 按名称把同一个值写入所有字段
pub struct DynamicFieldBinder<'d, D: PageDriver> {
    driver: &'d D,
    layout: QuestionLayout,
}

impl<'d, D: PageDriver> DynamicFieldBinder<'d, D> {
    /// 创建新的绑定器
    pub fn new(driver: &'d D, layout: QuestionLayout) -> Self {
        Self { driver, layout }
    }

    pub fn layout(&self) -> &QuestionLayout {
        &self.layout
    }

    /// 发现当前页面上所有动态字段名
    ///
    /// # 返回
    /// 先按题目行顺序、再按行内 DOM 顺序排列的字段名。
    /// 空行不贡献任何字段；缺失的题目行直接报错，不返回部分结果。
    pub async fn discover_field_names(&self) -> BinderResult<Vec<String>> {
        Ok(self.bind().await?.names())
    }

    /// 发现字段并保留元素句柄，得到可按名称读写的绑定表
    pub async fn bind(&self) -> BinderResult<FieldBinding<'d, D>> {
        let mut binding = FieldBinding::new(self.driver);

        for locator in self.layout.groups() {
            let group = self
                .driver
                .find_group(&locator.selector, locator.index)
                .await?
                .ok_or_else(|| BinderError::group_not_found(&locator.selector, locator.index))?;

            let inputs = self
                .driver
                .list_inputs(&group, self.layout.input_selector())
                .await?;
            debug!("题目行 {} 包含 {} 个输入框", locator, inputs.len());

            for (position, element) in inputs.into_iter().enumerate() {
                let name = self
                    .driver
                    .get_attribute(&element, "name")
                    .await?
                    .ok_or_else(|| PageStateError::UnnamedInput {
                        selector: locator.selector.clone(),
                        index: locator.index,
                        position,
                    })?;
                binding.insert(name, locator.index, element)?;
            }
        }

        debug!("共发现 {} 个动态字段", binding.len());
        Ok(binding)
    }

    /// 发现所有字段，并按名称重新解析后写入 `fill_value`
    ///
    /// # 返回
    /// 成功写入的字段数。某个字段在发现后无法重新解析（脱离页面或解析时驱动出错）时返回
    /// [`BinderError::ElementResolution`]，写入本身失败时返回 [`BinderError::Write`]，
    /// 两者都带有已写入数量，不会跳过。
    pub async fn bind_and_fill_all(&self, fill_value: &str) -> BinderResult<usize> {
        let names = self.discover_field_names().await?;

        let mut filled = 0;
        for name in &names {
            let element = self
                .driver
                .resolve_field(name)
                .await
                .map_err(|source| BinderError::element_resolution_failed(name.as_str(), filled, source))?
                .ok_or_else(|| BinderError::element_resolution(name.as_str(), filled))?;

            self.driver
                .set_value(&element, fill_value)
                .await
                .map_err(|source| BinderError::Write {
                    name: name.clone(),
                    filled,
                    source,
                })?;
            filled += 1;
        }

        debug!("已写入 {}/{} 个字段", filled, names.len());
        Ok(filled)
    }
}
