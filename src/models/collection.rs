use serde::{Deserialize, Serialize};
use std::fmt;

/// Every keyed collection owned by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Areas,
    Entries,
    Orders,
    Tasks,
    Clients,
    Files,
    Settings,
}

impl Collection {
    /// Collections backed by an auto-increment `id` table, in backup order.
    pub const KEYED: [Collection; 7] = [
        Collection::Users,
        Collection::Areas,
        Collection::Entries,
        Collection::Orders,
        Collection::Tasks,
        Collection::Files,
        Collection::Clients,
    ];

    /// Same table name is used as the JSON key in exports and backups.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Areas => "areas",
            Collection::Entries => "entries",
            Collection::Orders => "orders",
            Collection::Tasks => "tasks",
            Collection::Clients => "clients",
            Collection::Files => "files",
            Collection::Settings => "settings",
        }
    }

    pub fn from_table(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Collection::Users),
            "areas" => Some(Collection::Areas),
            "entries" => Some(Collection::Entries),
            "orders" => Some(Collection::Orders),
            "tasks" => Some(Collection::Tasks),
            "clients" => Some(Collection::Clients),
            "files" => Some(Collection::Files),
            "settings" => Some(Collection::Settings),
            _ => None,
        }
    }

    /// Singular label used in messages ("entry #4 not found").
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Users => "user",
            Collection::Areas => "area",
            Collection::Entries => "entry",
            Collection::Orders => "order",
            Collection::Tasks => "task",
            Collection::Clients => "client",
            Collection::Files => "file",
            Collection::Settings => "setting",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
