use serde::{Deserialize, Serialize};

/// Auth account. The password hash stays in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}
