use std::collections::HashMap;

use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{Account, PublicAccount};
use crate::error::{Error, Result};
use crate::listings::Listing;
use crate::messages::dto::{Conversation, SendMessageRequest};
use crate::messages::repo_types::Message;
use crate::state::AppState;

/// Fold a user's received and sent messages into conversation buckets.
///
/// The grouping key always names the other party: (sender, listing) for
/// received messages, (receiver, listing) for sent ones. Received messages
/// are folded first and are the only ones that count toward unread. Output is
/// newest-first; ties keep insertion order (the sort is stable).
pub fn build_conversations(received: &[Message], sent: &[Message]) -> Vec<Conversation> {
    let mut buckets: Vec<Conversation> = Vec::new();
    let mut index: HashMap<(Uuid, Uuid), usize> = HashMap::new();

    for msg in received {
        match index.get(&(msg.sender_id, msg.listing_id)) {
            Some(&i) => {
                let conv = &mut buckets[i];
                if msg.timestamp > conv.last_message_time {
                    conv.last_message_time = msg.timestamp;
                }
                if !msg.read {
                    conv.unread_count += 1;
                }
            }
            None => {
                index.insert((msg.sender_id, msg.listing_id), buckets.len());
                buckets.push(Conversation {
                    counterpart_id: msg.sender_id,
                    counterpart_name: msg.sender_name.clone(),
                    listing_id: msg.listing_id,
                    listing_title: msg.listing_title.clone(),
                    last_message_time: msg.timestamp,
                    unread_count: if msg.read { 0 } else { 1 },
                });
            }
        }
    }

    for msg in sent {
        match index.get(&(msg.receiver_id, msg.listing_id)) {
            Some(&i) => {
                // Sent messages only advance the clock, never the unread count.
                let conv = &mut buckets[i];
                if msg.timestamp > conv.last_message_time {
                    conv.last_message_time = msg.timestamp;
                }
            }
            None => {
                index.insert((msg.receiver_id, msg.listing_id), buckets.len());
                buckets.push(Conversation {
                    counterpart_id: msg.receiver_id,
                    counterpart_name: msg.receiver_name.clone(),
                    listing_id: msg.listing_id,
                    listing_title: msg.listing_title.clone(),
                    last_message_time: msg.timestamp,
                    unread_count: 0,
                });
            }
        }
    }

    buckets.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
    buckets
}

/// Derive the conversation list for a user from the full message collection.
pub async fn conversations_for(state: &AppState, user_id: Uuid) -> Result<Vec<Conversation>> {
    let all = Message::load_all(state.store.as_ref()).await?;
    let (received, sent): (Vec<Message>, Vec<Message>) = all
        .into_iter()
        .filter(|m| m.receiver_id == user_id || m.sender_id == user_id)
        .partition(|m| m.receiver_id == user_id);
    debug!(
        user_id = %user_id,
        received = received.len(),
        sent = sent.len(),
        "building conversations"
    );
    Ok(build_conversations(&received, &sent))
}

/// Unread incoming messages across all conversations, for the dashboard
/// summary.
pub async fn unread_messages_for(state: &AppState, user_id: Uuid) -> Result<usize> {
    let all = Message::load_all(state.store.as_ref()).await?;
    Ok(all
        .iter()
        .filter(|m| m.receiver_id == user_id && !m.read)
        .count())
}

/// Open one conversation thread: both directions between the user and the
/// counterpart, scoped to the listing, oldest first.
///
/// The user's unread incoming messages in the thread are flipped to read and
/// persisted. The write is skipped when nothing changed, so re-opening an
/// already-read thread is a pure read.
pub async fn open_conversation(
    state: &AppState,
    user_id: Uuid,
    counterpart_id: Uuid,
    listing_id: Uuid,
) -> Result<Vec<Message>> {
    let store = state.store.as_ref();
    let mut all = Message::load_all(store).await?;

    let mut flipped = 0usize;
    for msg in all.iter_mut() {
        if msg.listing_id == listing_id
            && msg.receiver_id == user_id
            && msg.sender_id == counterpart_id
            && !msg.read
        {
            msg.read = true;
            flipped += 1;
        }
    }
    if flipped > 0 {
        Message::save_all(store, &all).await?;
        debug!(
            user_id = %user_id,
            counterpart_id = %counterpart_id,
            flipped,
            "marked messages read"
        );
    }

    let mut thread: Vec<Message> = all
        .into_iter()
        .filter(|m| {
            m.listing_id == listing_id
                && ((m.sender_id == user_id && m.receiver_id == counterpart_id)
                    || (m.receiver_id == user_id && m.sender_id == counterpart_id))
        })
        .collect();
    thread.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(thread)
}

/// Send a message about a listing. Rejections leave the collection untouched.
/// Returns the stored record so callers can extend their in-memory thread
/// without a reload.
pub async fn send_message(
    state: &AppState,
    sender: &PublicAccount,
    req: SendMessageRequest,
) -> Result<Message> {
    if !sender.is_authenticated() {
        return Err(Error::PermissionDenied("login required to send messages"));
    }
    if req.content.trim().is_empty() {
        return Err(Error::validation("Please enter a message to send."));
    }
    if req.receiver_id == sender.id {
        return Err(Error::validation("You cannot message yourself."));
    }

    let store = state.store.as_ref();
    let receiver = Account::find_by_id(store, req.receiver_id)
        .await?
        .ok_or(Error::NotFound("account"))?;
    let listing = Listing::find_by_id(store, req.listing_id)
        .await?
        .ok_or(Error::NotFound("listing"))?;

    let message = Message {
        id: Uuid::new_v4(),
        sender_id: sender.id,
        sender_name: sender.name.clone(),
        receiver_id: receiver.id,
        receiver_name: receiver.name,
        listing_id: listing.id,
        listing_title: listing.title,
        content: req.content,
        timestamp: OffsetDateTime::now_utc(),
        read: false,
    };
    Message::append(store, &message).await?;
    info!(
        message_id = %message.id,
        sender_id = %message.sender_id,
        receiver_id = %message.receiver_id,
        listing_id = %message.listing_id,
        "message sent"
    );
    Ok(message)
}
