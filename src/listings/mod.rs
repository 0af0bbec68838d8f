mod dto;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{CreateListingRequest, ListingFilter};
pub use repo_types::{Listing, ListingKind, CATEGORIES, CONDITIONS};
