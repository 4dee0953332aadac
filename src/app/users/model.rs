//! 用户数据模型

use serde::Serialize;

/// 用户记录，只保留标识与名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
