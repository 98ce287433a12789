use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
}

/// The identity the client is currently acting as.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// Fixed placeholder identity used while authentication is stubbed out.
    pub fn guest() -> Self {
        Self {
            user: User {
                id: 0,
                username: "guest".to_string(),
                email: "guest@example.com".to_string(),
            },
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// Body of the signup call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}
