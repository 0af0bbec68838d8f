use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Derived view, never stored. One conversation per (counterpart, listing)
/// pair; the pair is unordered, so it is the same conversation no matter who
/// sent which message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Conversation {
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub listing_id: Uuid,
    pub listing_title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_message_time: OffsetDateTime,
    pub unread_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Uuid,
    pub listing_id: Uuid,
    pub content: String,
}
