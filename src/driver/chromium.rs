//! Chromium 驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，通过 CDP 暴露页面访问能力

use chromiumoxide::{Element, Page};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::driver::PageDriver;
use crate::error::DriverError;

/// Chromium 驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 把 [`PageDriver`] 的各项能力翻译成 CDP 调用
/// - 不认识题目行布局，不处理填写流程
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    /// 创建新的 Chromium 驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于导航等其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 用给定 HTML 替换当前页面内容
    pub async fn load_html(&self, html: &str) -> Result<(), DriverError> {
        self.page
            .set_content(html)
            .await
            .map_err(|e| DriverError::new("load_html", e))?;
        Ok(())
    }
}

impl PageDriver for ChromiumDriver {
    type Group = Element;
    type Element = Element;

    async fn find_group(&self, selector: &str, index: usize) -> Result<Option<Element>, DriverError> {
        let groups = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| DriverError::new("find_group", e))?;
        debug!("选择器 {} 匹配到 {} 个题目行", selector, groups.len());
        Ok(groups.into_iter().nth(index))
    }

    async fn list_inputs(&self, group: &Element, input_selector: &str) -> Result<Vec<Element>, DriverError> {
        group
            .find_elements(input_selector)
            .await
            .map_err(|e| DriverError::new("list_inputs", e))
    }

    async fn get_attribute(&self, element: &Element, attribute: &str) -> Result<Option<String>, DriverError> {
        element
            .attribute(attribute)
            .await
            .map_err(|e| DriverError::new("get_attribute", e))
    }

    async fn get_value(&self, element: &Element) -> Result<String, DriverError> {
        let value = element
            .property("value")
            .await
            .map_err(|e| DriverError::new("get_value", e))?;
        Ok(match value {
            Some(JsonValue::String(s)) => s,
            Some(JsonValue::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    }

    async fn set_value(&self, element: &Element, value: &str) -> Result<(), DriverError> {
        element
            .call_js_fn(set_value_js(value)?, false)
            .await
            .map_err(|e| DriverError::new("set_value", e))?;
        Ok(())
    }

    async fn resolve_field(&self, name: &str) -> Result<Option<Element>, DriverError> {
        let matches = self
            .page
            .find_elements(name_selector(name))
            .await
            .map_err(|e| DriverError::new("resolve_field", e))?;
        Ok(matches.into_iter().next())
    }
}

/// 生成赋值并派发 input/change 事件的函数声明，让页面上的监听器感知到修改
fn set_value_js(value: &str) -> Result<String, DriverError> {
    let literal = serde_json::to_string(value)?;
    Ok(format!(
        r#"function() {{
            this.value = {literal};
            this.dispatchEvent(new Event('input', {{ bubbles: true }}));
            this.dispatchEvent(new Event('change', {{ bubbles: true }}));
        }}"#
    ))
}

/// 按 name 属性精确匹配的 CSS 选择器
fn name_selector(name: &str) -> String {
    format!("[name=\"{}\"]", css_string_escape(name))
}

/// 转义 CSS 字符串内容：`\` 与 `"` 加反斜杠，控制字符写成十六进制转义，NUL 换成 U+FFFD
fn css_string_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\0' => escaped.push('\u{FFFD}'),
            '\\' | '"' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() && (c as u32) <= 0x7f => {
                escaped.push_str(&format!("\\{:x} ", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_selector_quotes_and_escapes() {
        assert_eq!(name_selector("car__1"), r#"[name="car__1"]"#);
        assert_eq!(name_selector(r#"a"b\c"#), r#"[name="a\"b\\c"]"#);
    }

    #[test]
    fn name_selector_hex_escapes_control_characters() {
        assert_eq!(name_selector("car\n__1"), "[name=\"car\\a __1\"]");
        assert_eq!(name_selector("a\tb\u{7f}"), "[name=\"a\\9 b\\7f \"]");
        assert_eq!(name_selector("a\0b"), "[name=\"a\u{FFFD}b\"]");
        assert_eq!(name_selector("题目__1"), "[name=\"题目__1\"]");
    }

    #[test]
    fn set_value_js_embeds_a_json_string_literal() {
        let js = set_value_js("it's \"X\"").unwrap();
        assert!(js.contains(r#"this.value = "it's \"X\"";"#));
        assert!(js.contains("new Event('change'"));
    }
}
