use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo_types::{AccountStatus, Role};

/// Registration input.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login input.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Public part of an account: what the session caches and views render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl PublicAccount {
    /// General navigation guard: a known account that has been approved.
    pub fn is_authenticated(&self) -> bool {
        self.status == AccountStatus::Approved
    }

    /// Admin guard. Requires approval as well as the role: a suspended or
    /// pending admin holds no moderation power.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin && self.is_authenticated()
    }
}
