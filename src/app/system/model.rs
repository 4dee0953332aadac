//! 系统路由数据模型

use serde::Serialize;

/// 服务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceStatus {
    #[serde(rename = "OK")]
    Ok,
}

/// GET /health 响应体
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: ServiceStatus,
    /// 进程启动以来的秒数
    pub uptime: f64,
}

/// GET /api 响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeMessage {
    pub message: String,
}
