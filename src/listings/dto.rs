use serde::Deserialize;

use crate::listings::repo_types::ListingKind;

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub kind: ListingKind,
    pub category: String,
    pub condition: Option<String>,
    pub image: Option<String>,
}

/// Catalog filter. Each axis is independent; the sentinel values
/// ("All Categories", "all") switch an axis off.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingFilter {
    pub search_term: String,
    pub category: String,
    pub kind: String,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: "All Categories".into(),
            kind: "all".into(),
        }
    }
}
