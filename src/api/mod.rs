//! API 模块
//!
//! 负责把资源式请求映射到核心操作，与传输层无关

pub mod handlers;
pub mod payload;
pub mod request;
pub mod routes;

// 重新导出常用类型
pub use handlers::TriviaApi;
pub use payload::QuestionView;
pub use request::{ApiRequest, ApiResponse};
pub use routes::{Route, RouteError, Router};
