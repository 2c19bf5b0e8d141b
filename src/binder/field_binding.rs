//! 字段绑定表
//!
//! 名称 → 元素句柄的显式映射，在一次发现中构建，只对构建它的页面状态有效。

use std::collections::HashMap;

use tracing::debug;

use crate::driver::PageDriver;
use crate::error::{BinderError, BinderResult, PageStateError};

/// 已绑定的单个字段
#[derive(Debug)]
pub struct BoundField<E> {
    pub name: String,
    /// 所在题目行的序号
    pub group: usize,
    element: E,
}

/// 字段绑定表
///
/// 借用驱动，页面会话结束后不能继续使用。
pub struct FieldBinding<'d, D: PageDriver> {
    driver: &'d D,
    fields: Vec<BoundField<D::Element>>,
    by_name: HashMap<String, usize>,
}

impl<'d, D: PageDriver> FieldBinding<'d, D> {
    pub(crate) fn new(driver: &'d D) -> Self {
        Self {
            driver,
            fields: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// 追加字段，同名字段视为页面模型错误，不会覆盖
    pub(crate) fn insert(
        &mut self,
        name: String,
        group: usize,
        element: D::Element,
    ) -> Result<(), PageStateError> {
        if let Some(&existing) = self.by_name.get(&name) {
            return Err(PageStateError::DuplicateFieldName {
                first_group: self.fields[existing].group,
                second_group: group,
                name,
            });
        }
        self.by_name.insert(name.clone(), self.fields.len());
        self.fields.push(BoundField {
            name,
            group,
            element,
        });
        Ok(())
    }

    /// 按发现顺序返回字段名
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn fields(&self) -> &[BoundField<D::Element>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn lookup(&self, name: &str) -> BinderResult<&BoundField<D::Element>> {
        self.by_name
            .get(name)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| BinderError::UnknownField {
                name: name.to_string(),
            })
    }

    /// 读取字段当前值
    pub async fn get(&self, name: &str) -> BinderResult<String> {
        let field = self.lookup(name)?;
        Ok(self.driver.get_value(&field.element).await?)
    }

    /// 写入字段值
    pub async fn set(&self, name: &str, value: &str) -> BinderResult<()> {
        let field = self.lookup(name)?;
        self.driver
            .set_value(&field.element, value)
            .await
            .map_err(|source| BinderError::Write {
                name: name.to_string(),
                filled: 0,
                source,
            })
    }

    /// 通过保留的句柄依次写入所有字段
    ///
    /// # 返回
    /// 成功写入的字段数；失败时错误中带有已写入数量
    pub async fn fill_all(&self, value: &str) -> BinderResult<usize> {
        let mut filled = 0;
        for field in &self.fields {
            self.driver
                .set_value(&field.element, value)
                .await
                .map_err(|source| BinderError::Write {
                    name: field.name.clone(),
                    filled,
                    source,
                })?;
            filled += 1;
        }
        debug!("通过绑定表写入 {} 个字段", filled);
        Ok(filled)
    }

    /// 按发现顺序读取所有字段的 (名称, 值)
    pub async fn values(&self) -> BinderResult<Vec<(String, String)>> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = self.driver.get_value(&field.element).await?;
            values.push((field.name.clone(), value));
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MemoryPage;
    use tokio_test::block_on;

    #[test]
    fn duplicate_names_are_rejected_not_overwritten() {
        let page = MemoryPage::new(".answer_row");
        let mut binding = FieldBinding::new(&page);
        binding.insert("car__1".to_string(), 0, 0).unwrap();

        let err = binding.insert("car__1".to_string(), 2, 5).unwrap_err();
        assert_eq!(
            err,
            PageStateError::DuplicateFieldName {
                name: "car__1".to_string(),
                first_group: 0,
                second_group: 2,
            }
        );
        assert_eq!(binding.len(), 1);
    }

    #[test]
    fn unknown_names_are_reported() {
        let page = MemoryPage::new(".answer_row").with_row(["car__1"]);
        let mut binding = FieldBinding::new(&page);
        binding.insert("car__1".to_string(), 0, 0).unwrap();

        let err = block_on(binding.set("car__9", "X")).unwrap_err();
        assert!(matches!(err, BinderError::UnknownField { ref name } if name == "car__9"));
        assert_eq!(page.write_count(), 0);
    }

    #[test]
    fn set_then_get_round_trips_through_driver() {
        let page = MemoryPage::new(".answer_row").with_row(["car__1", "car__2"]);
        let mut binding = FieldBinding::new(&page);
        binding.insert("car__1".to_string(), 0, 0).unwrap();
        binding.insert("car__2".to_string(), 0, 1).unwrap();

        block_on(binding.set("car__2", "Y")).unwrap();
        assert_eq!(block_on(binding.get("car__2")).unwrap(), "Y");
        assert_eq!(block_on(binding.get("car__1")).unwrap(), "");
    }

    #[test]
    fn fill_all_reports_partial_count_on_stale_element() {
        let page = MemoryPage::new(".answer_row").with_row(["a__1", "b__2", "c__3"]);
        let mut binding = FieldBinding::new(&page);
        for (i, name) in ["a__1", "b__2", "c__3"].iter().enumerate() {
            binding.insert(name.to_string(), 0, i).unwrap();
        }
        page.detach("c__3");

        let err = block_on(binding.fill_all("X")).unwrap_err();
        assert!(matches!(err, BinderError::Write { ref name, filled: 2, .. } if name == "c__3"));
        assert_eq!(page.value_of("a__1").as_deref(), Some("X"));
    }
}
