//! 内存页面驱动
//!
//! 不启动浏览器，用行列表模拟题目行与动态命名的输入框，供测试使用。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::driver::PageDriver;
use crate::error::DriverError;

#[derive(Debug, Clone)]
struct MemoryField {
    name: Option<String>,
    value: String,
    attached: bool,
}

/// 内存页面
///
/// ```
/// use dynamic_fields::MemoryPage;
///
/// let page = MemoryPage::new(".answer_row")
///     .with_row(["car__1", "car__2"])
///     .with_row(Vec::<String>::new());
/// assert_eq!(page.value_of("car__1").as_deref(), Some(""));
/// ```
#[derive(Debug)]
pub struct MemoryPage {
    group_selector: String,
    rows: Vec<Vec<usize>>,
    fields: Mutex<Vec<MemoryField>>,
    writes: AtomicUsize,
}

impl MemoryPage {
    /// 创建空页面，`group_selector` 为题目行选择器
    pub fn new(group_selector: impl Into<String>) -> Self {
        Self {
            group_selector: group_selector.into(),
            rows: Vec::new(),
            fields: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// 追加一行，行内输入框按给定顺序命名
    pub fn with_row<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_raw_row(names.into_iter().map(|n| Some(n.into())))
    }

    /// 追加一行，`None` 表示没有 name 属性的输入框
    pub fn with_raw_row(mut self, names: impl IntoIterator<Item = Option<String>>) -> Self {
        let fields = self.fields.get_mut().unwrap_or_else(|e| e.into_inner());
        let mut row = Vec::new();
        for name in names {
            row.push(fields.len());
            fields.push(MemoryField {
                name,
                value: String::new(),
                attached: true,
            });
        }
        self.rows.push(row);
        self
    }

    /// 使字段脱离页面，模拟发现与写入之间页面被修改
    ///
    /// 返回是否找到该字段
    pub fn detach(&self, name: &str) -> bool {
        let mut fields = self.lock_fields();
        let mut found = false;
        for field in fields.iter_mut() {
            if field.name.as_deref() == Some(name) {
                field.attached = false;
                found = true;
            }
        }
        found
    }

    /// 读取第一个同名字段的当前值
    pub fn value_of(&self, name: &str) -> Option<String> {
        self.lock_fields()
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
            .map(|f| f.value.clone())
    }

    /// 成功写入的次数
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock_fields(&self) -> MutexGuard<'_, Vec<MemoryField>> {
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn attached_field(&self, operation: &'static str, id: usize) -> Result<MemoryField, DriverError> {
        match self.lock_fields().get(id) {
            Some(field) if field.attached => Ok(field.clone()),
            Some(_) => Err(DriverError::new(operation, format!("元素 #{} 已脱离页面", id))),
            None => Err(DriverError::new(operation, format!("元素 #{} 不存在", id))),
        }
    }
}

impl PageDriver for MemoryPage {
    type Group = usize;
    type Element = usize;

    async fn find_group(&self, selector: &str, index: usize) -> Result<Option<usize>, DriverError> {
        if selector != self.group_selector || index >= self.rows.len() {
            return Ok(None);
        }
        Ok(Some(index))
    }

    async fn list_inputs(&self, group: &usize, _input_selector: &str) -> Result<Vec<usize>, DriverError> {
        let row = self
            .rows
            .get(*group)
            .ok_or_else(|| DriverError::new("list_inputs", format!("题目行 #{} 不存在", group)))?;
        let fields = self.lock_fields();
        Ok(row
            .iter()
            .copied()
            .filter(|id| fields.get(*id).is_some_and(|f| f.attached))
            .collect())
    }

    async fn get_attribute(&self, element: &usize, attribute: &str) -> Result<Option<String>, DriverError> {
        let field = self.attached_field("get_attribute", *element)?;
        Ok(match attribute {
            "name" => field.name,
            "value" => Some(field.value),
            _ => None,
        })
    }

    async fn get_value(&self, element: &usize) -> Result<String, DriverError> {
        Ok(self.attached_field("get_value", *element)?.value)
    }

    async fn set_value(&self, element: &usize, value: &str) -> Result<(), DriverError> {
        let mut fields = self.lock_fields();
        match fields.get_mut(*element) {
            Some(field) if field.attached => {
                field.value = value.to_string();
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            _ => Err(DriverError::new("set_value", format!("元素 #{} 已脱离页面", element))),
        }
    }

    async fn resolve_field(&self, name: &str) -> Result<Option<usize>, DriverError> {
        Ok(self
            .lock_fields()
            .iter()
            .position(|f| f.attached && f.name.as_deref() == Some(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn page() -> MemoryPage {
        MemoryPage::new(".answer_row")
            .with_row(["car__1", "car__2"])
            .with_row(["mother__9"])
    }

    #[test]
    fn groups_match_selector_and_count() {
        let page = page();
        assert_eq!(block_on(page.find_group(".answer_row", 1)).unwrap(), Some(1));
        assert_eq!(block_on(page.find_group(".answer_row", 2)).unwrap(), None);
        assert_eq!(block_on(page.find_group(".other_row", 0)).unwrap(), None);
    }

    #[test]
    fn detached_fields_cannot_be_resolved_or_written() {
        let page = page();
        let element = block_on(page.resolve_field("car__2")).unwrap().unwrap();
        assert!(page.detach("car__2"));

        assert_eq!(block_on(page.resolve_field("car__2")).unwrap(), None);
        assert!(block_on(page.set_value(&element, "X")).is_err());
        assert_eq!(page.write_count(), 0);
    }

    #[test]
    fn set_value_is_visible_through_value_of() {
        let page = page();
        let element = block_on(page.resolve_field("mother__9")).unwrap().unwrap();
        block_on(page.set_value(&element, "X")).unwrap();

        assert_eq!(page.value_of("mother__9").as_deref(), Some("X"));
        assert_eq!(page.write_count(), 1);
    }
}
