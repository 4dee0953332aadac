//! 用户列表

pub mod handler;
pub mod model;
pub mod service;

pub use model::User;
pub use service::UserService;
