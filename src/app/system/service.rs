//! 欢迎信息与健康检查

use super::model::{HealthStatus, ServiceStatus, WelcomeMessage};
use crate::infrastructure::clock::ProcessClock;

pub const WELCOME_MESSAGE: &str = "Welcome to the API";

pub fn welcome() -> WelcomeMessage {
    WelcomeMessage {
        message: WELCOME_MESSAGE.to_string(),
    }
}

/// 只读取进程时钟，不做任何修改
pub fn health(clock: &ProcessClock) -> HealthStatus {
    HealthStatus {
        status: ServiceStatus::Ok,
        uptime: clock.uptime_secs(),
    }
}
