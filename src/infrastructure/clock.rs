//! 进程时钟

use std::time::{Duration, Instant};

/// 进程启动时刻
///
/// 在进程初始化时捕获一次，之后只读。`Instant` 单调递增，
/// 因此 `uptime` 不会回退。
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    started_at: Instant,
}

impl ProcessClock {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 运行时长（秒，带小数）
    pub fn uptime_secs(&self) -> f64 {
        self.uptime().as_secs_f64()
    }
}
