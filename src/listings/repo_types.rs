use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// How an item is offered: for sale, for rent, or shared for free.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Sell,
    Rent,
    Share,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Sell => "sell",
            ListingKind::Rent => "rent",
            ListingKind::Share => "share",
        }
    }
}

/// Fixed category vocabulary. "All Categories" is a filter value, not a category.
pub const CATEGORIES: [&str; 13] = [
    "Textbooks",
    "Notes",
    "Electronics",
    "Stationery",
    "Lab Equipment",
    "Furniture",
    "Sports Gear",
    "Clothing",
    "Project Materials",
    "Study Guides",
    "Calculators",
    "Room Essentials",
    "Other",
];

pub const CONDITIONS: [&str; 5] = ["New", "Like New", "Good", "Fair", "Poor"];

/// Stored listing record. Immutable after creation except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub category: String,
    /// Absent for shared items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Inline data-URL text, when the owner attached a picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
