use serde::{Deserialize, Serialize};

/// The signed-in account as reported by `/auth/me`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}
