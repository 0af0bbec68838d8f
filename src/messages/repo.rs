use crate::messages::repo_types::Message;
use crate::store::{load_collection, save_collection, RecordStore, MESSAGES};

impl Message {
    pub async fn load_all(store: &dyn RecordStore) -> anyhow::Result<Vec<Message>> {
        load_collection(store, MESSAGES).await
    }

    pub async fn save_all(store: &dyn RecordStore, rows: &[Message]) -> anyhow::Result<()> {
        save_collection(store, MESSAGES, rows).await
    }

    pub async fn append(store: &dyn RecordStore, message: &Message) -> anyhow::Result<()> {
        let mut messages = Self::load_all(store).await?;
        messages.push(message.clone());
        Self::save_all(store, &messages).await
    }
}
