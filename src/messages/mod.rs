mod dto;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{Conversation, SendMessageRequest};
pub use repo_types::Message;
