use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// 连接到已开启调试端口的浏览器并获取页面
///
/// # 参数
/// - `port`: 浏览器调试端口
/// - `target_url`: 找不到匹配页面时新建页面并导航到此地址
/// - `target_title`: 优先复用标题包含该文本的已有页面
pub async fn connect_to_browser_and_page(
    port: u16,
    target_url: Option<&str>,
    target_title: Option<&str>,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url)
        .await
        .with_context(|| format!("无法连接到浏览器 (端口: {})", port))?;
    super::spawn_handler(handler);

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    if let Some(title) = target_title {
        let pages = browser.pages().await.context("获取页面列表失败")?;
        debug!("获取到 {} 个页面，查找标题包含 '{}' 的页面", pages.len(), title);

        let mut titles = Vec::with_capacity(pages.len());
        for page in &pages {
            titles.push(page.get_title().await.ok().flatten());
        }

        if let Some(index) = find_page_by_title(&titles, title) {
            if let Some(page) = pages.into_iter().nth(index) {
                info!("✓ 复用已有页面: {}", titles[index].as_deref().unwrap_or_default());
                return Ok((browser, page));
            }
        }
        debug!("未找到匹配的页面，将创建新页面");
    }

    let url = target_url.unwrap_or("about:blank");
    let page = browser
        .new_page(url)
        .await
        .with_context(|| format!("创建页面并导航到 {} 失败", url))?;
    info!("已导航到: {}", url);

    Ok((browser, page))
}

/// 返回第一个标题包含 `target_title` 的页面序号，读取标题失败的页面跳过
fn find_page_by_title(titles: &[Option<String>], target_title: &str) -> Option<usize> {
    titles
        .iter()
        .position(|t| t.as_deref().is_some_and(|t| t.contains(target_title)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_title_wins() {
        let titles = vec![
            None,
            Some("登录".to_string()),
            Some("问卷 - 第一页".to_string()),
            Some("问卷 - 第二页".to_string()),
        ];
        assert_eq!(find_page_by_title(&titles, "问卷"), Some(2));
        assert_eq!(find_page_by_title(&titles, "第二页"), Some(3));
    }

    #[test]
    fn no_match_creates_new_page() {
        let titles = vec![None, Some("登录".to_string())];
        assert_eq!(find_page_by_title(&titles, "问卷"), None);
        assert_eq!(find_page_by_title(&[], "问卷"), None);
    }
}
