//! # Trivia API
//!
//! 按分类存放的问答题库：分页、搜索、按分类列出、创建、删除，以及测验随机抽题
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有唯一的题库数据，只暴露读写能力
//! - `TriviaStore` - 锁内读写，可选回写 TOML，失败回滚
//!
//! ### ② 业务能力层（Services）
//! - `CategoryDirectory` - 分类 id ↔ 分类名
//! - `QuestionRepository` - 题目增删、过滤、搜索
//! - `Paginator` - 固定页大小分页
//! - `QuizSelector` - 从未出过的题目中随机抽取
//!
//! ### ③ 接口层（API）
//! - `api/` - 路由、请求体解析、响应体渲染、错误码映射
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 启动、加载题库、请求循环
//!
//! ## 模块结构

pub mod api;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use api::{ApiRequest, ApiResponse, TriviaApi};
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use infrastructure::TriviaStore;
pub use models::{Category, NewQuestion, Question, QuizOutcome, QuizRequest, TriviaBank};
pub use orchestrator::App;
pub use services::{CategoryDirectory, Paginator, QuestionRepository, QuizSelector};
