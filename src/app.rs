use anyhow::{bail, Context, Result};
use chromiumoxide::Browser;
use tracing::info;

use crate::binder::QuestionLayout;
use crate::browser;
use crate::config::Config;
use crate::driver::ChromiumDriver;
use crate::utils::logging;
use crate::workflow::{FillStep, StepReport};

/// 应用主结构
///
/// 持有浏览器与驱动，其余层只借用驱动
pub struct App {
    config: Config,
    layout: QuestionLayout,
    _browser: Browser,
    driver: ChromiumDriver,
}

impl App {
    /// 初始化应用：解析布局并打开目标页面
    pub async fn initialize(config: Config) -> Result<Self> {
        let layout = config.layout().await.context("加载题目行布局失败")?;
        logging::log_startup(&config.target_url, &layout);

        let (browser, page) = if config.headless {
            browser::launch_headless_browser(&config.target_url, config.chrome_executable.as_deref()).await?
        } else {
            browser::connect_to_browser_and_page(
                config.browser_debug_port,
                Some(&config.target_url),
                config.target_title.as_deref(),
            )
            .await?
        };

        Ok(Self {
            config,
            layout,
            _browser: browser,
            driver: ChromiumDriver::new(page),
        })
    }

    /// 运行填写步骤并输出统计
    pub async fn run(&self) -> Result<StepReport> {
        let step = FillStep::new(self.layout.clone(), self.config.fill_value.clone());
        let report = step.run(&self.driver).await.context("填写步骤失败")?;

        logging::log_discovered(&report.names);
        logging::print_final_stats(report.filled, report.names.len(), &report.mismatched);

        if !report.is_complete() {
            bail!("填写未完成: {}", report);
        }
        info!("✓ 填写步骤完成 {}", report);
        Ok(report)
    }
}
