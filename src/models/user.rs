use super::collection::Collection;
use crate::db::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    FieldWorker,
    StaffManager,
    Executive,
}

impl Role {
    /// Accepts the kebab-case code as well as the legacy German role names.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "field-worker" | "putzkraft" => Some(Role::FieldWorker),
            "staff-manager" | "personal" => Some(Role::StaffManager),
            "executive" | "geschaeft" => Some(Role::Executive),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Role::FieldWorker => "field-worker",
            Role::StaffManager => "staff-manager",
            Role::Executive => "executive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::FieldWorker => "Putzkraft",
            Role::StaffManager => "Personalmanagement",
            Role::Executive => "Geschäftsführung",
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Role::StaffManager | Role::Executive)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub salt: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
