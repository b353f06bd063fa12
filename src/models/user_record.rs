use serde::{Deserialize, Serialize};

use crate::validation::join_roles;

/// A user as listed by the API. Owned by the remote service; only cached
/// for the duration of a page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserRecord {
    pub fn roles_display(&self) -> String {
        join_roles(&self.roles)
    }
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: String,
    pub roles: Vec<String>,
}
