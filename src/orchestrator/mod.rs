//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (启动 + 请求循环)
//!     ↓
//! api::TriviaApi (路由 + 请求体解析 + 响应渲染)
//!     ↓
//! services (能力层：分类目录 / 题目仓库 / 分页 / 抽题)
//!     ↓
//! infrastructure (基础设施：TriviaStore)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断

pub mod app;

pub use app::{App, ServeStats};
