//! 欢迎信息与健康检查

pub mod handler;
pub mod model;
pub mod service;

pub use model::{HealthStatus, ServiceStatus, WelcomeMessage};
