use super::user::{Role, User};
use serde::{Deserialize, Serialize};

/// The authenticated user an operation is performed on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    pub fn is_executive(&self) -> bool {
        self.role == Role::Executive
    }
}

impl From<&User> for Actor {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            role: u.role,
        }
    }
}
