//! 用户业务服务

use std::sync::Arc;

use super::model::User;

/// 启动时写入的示例用户
const SEED_USERS: &[(u32, &str)] = &[(1, "John Doe"), (2, "Jane Smith"), (3, "Bob Johnson")];

/// 只读的用户列表服务
///
/// 列表在构造时生成一次，之后所有请求共享同一份数据。
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<Vec<User>>,
}

impl UserService {
    /// 使用内置示例数据构造
    pub fn seeded() -> Self {
        let users = SEED_USERS
            .iter()
            .map(|&(id, name)| User::new(id, name))
            .collect();
        Self {
            users: Arc::new(users),
        }
    }

    pub fn list_users(&self) -> Vec<User> {
        self.users.as_ref().clone()
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }
}
