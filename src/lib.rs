pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod listings;
pub mod messages;
pub mod state;
pub mod store;

pub use error::{Error, Result};
