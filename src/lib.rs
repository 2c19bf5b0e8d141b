//! # Dynamic Fields
//!
//! 测试表单字段名在页面渲染时才生成的网页。
//!
//! ## 架构设计
//!
//! ### ① 驱动层（Driver）
//! - `driver/` - 页面访问能力，`PageDriver` trait
//! - `ChromiumDriver` - 唯一的 page owner，通过 CDP 实现
//! - `MemoryPage` - 内存页面，测试替身
//!
//! ### ② 绑定层（Binder）
//! - `binder/` - 发现动态字段名，构建名称 → 元素绑定表
//! - `QuestionLayout` - 固定数量的题目行，按结构位置定位
//! - `DynamicFieldBinder` - 发现 / 绑定 / 全部填写
//!
//! ### ③ 流程层（Workflow）
//! - `FillStep` - 测试步骤入口（绑定 → 填写 → 回读）
//!
//! ### ④ 应用层
//! - `App` - 打开浏览器页面并运行填写步骤

pub mod app;
pub mod binder;
pub mod browser;
pub mod config;
pub mod driver;
pub mod error;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use binder::{DynamicFieldBinder, FieldBinding, QuestionLayout};
pub use config::Config;
pub use driver::{ChromiumDriver, MemoryPage, PageDriver};
pub use error::{BinderError, BinderResult, DriverError, PageStateError};
pub use workflow::{FillStep, StepReport};
