mod dto;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod session;

pub use dto::{
    ChangePasswordRequest, LoginRequest, PublicAccount, RegisterRequest, UpdateNameRequest,
};
pub use repo_types::{Account, AccountStatus, Role};
