//! 浏览器会话
//!
//! 只负责拿到一个可用的 Page，页面上的字段操作交给 driver 层。

pub mod connection;
pub mod headless;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_headless_browser;

use chromiumoxide::Handler;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// 在后台处理浏览器事件，出错即退出
pub(crate) fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}
