use anyhow::{anyhow, Context, Result};
use chromiumoxide::{Browser, BrowserConfig, Page};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// 启动无头浏览器并导航到指定 URL
///
/// # 参数
/// - `url`: 初始页面
/// - `executable`: 浏览器可执行文件，`None` 时由 chromiumoxide 自动查找
pub async fn launch_headless_browser(url: &str, executable: Option<&str>) -> Result<(Browser, Page)> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    if let Some(path) = executable {
        debug!("使用浏览器: {}", path);
        builder = builder.chrome_executable(path);
    }
    let config = builder
        .build()
        .map_err(|e| anyhow!("配置无头浏览器失败: {}", e))?;

    let (browser, handler) = Browser::launch(config)
        .await
        .context("启动无头浏览器失败")?;
    super::spawn_handler(handler);

    sleep(Duration::from_millis(300)).await;

    let page = browser
        .new_page(url)
        .await
        .with_context(|| format!("创建页面并导航到 {} 失败", url))?;
    info!("✅ 无头浏览器已导航到: {}", url);

    Ok((browser, page))
}
