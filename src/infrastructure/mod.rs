//! 基础设施层：日志与进程时钟

pub mod clock;
pub mod logger;
