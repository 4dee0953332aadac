//! # welcome-api
//!
//! 最小的 JSON HTTP 服务，提供：
//! - `GET /api`：欢迎信息
//! - `GET /health`：健康状态与进程运行时长
//! - `GET /api/users`：用户列表
//!
//! 分层结构：`app` 处理路由与业务，`core` 提供错误与中间件，
//! `infrastructure` 提供日志与进程时钟。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
pub use config::{Config, ConfigError};
