//! 页面访问驱动
//!
//! 绑定器只依赖 [`PageDriver`] 提供的能力，不关心背后是 CDP 还是内存页面。

pub mod chromium;
pub mod memory;

pub use chromium::ChromiumDriver;
pub use memory::MemoryPage;

use crate::error::DriverError;

/// 页面访问能力
///
/// 职责：
/// - 按结构选择器定位题目行
/// - 列出行内输入框（保持 DOM 顺序）
/// - 读取属性、读写字段值
/// - 按字段名重新解析元素
///
/// 超时与取消由具体实现负责，绑定器不做重试。
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// 题目行句柄
    type Group;
    /// 输入元素句柄
    type Element;

    /// 定位第 `index` 个匹配 `selector` 的题目行，不存在时返回 `None`
    async fn find_group(&self, selector: &str, index: usize)
        -> Result<Option<Self::Group>, DriverError>;

    /// 按 DOM 顺序列出题目行内匹配 `input_selector` 的输入元素
    async fn list_inputs(
        &self,
        group: &Self::Group,
        input_selector: &str,
    ) -> Result<Vec<Self::Element>, DriverError>;

    async fn get_attribute(
        &self,
        element: &Self::Element,
        attribute: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn get_value(&self, element: &Self::Element) -> Result<String, DriverError>;

    async fn set_value(&self, element: &Self::Element, value: &str) -> Result<(), DriverError>;

    /// 按字段名重新解析活动元素，元素已脱离页面时返回 `None`
    async fn resolve_field(&self, name: &str) -> Result<Option<Self::Element>, DriverError>;
}
