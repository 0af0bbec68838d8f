use tracing::warn;

use crate::auth::dto::PublicAccount;
use crate::store::{RecordStore, CURRENT_SESSION};

/// The persisted session: one `current_session` record holding the public
/// account view of whoever logged in last.
pub struct Session;

impl Session {
    /// Read the persisted session. A malformed record is discarded rather
    /// than surfaced; the caller sees a logged-out state.
    pub async fn load(store: &dyn RecordStore) -> anyhow::Result<Option<PublicAccount>> {
        let Some(text) = store.read(CURRENT_SESSION).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<PublicAccount>(&text) {
            Ok(account) => Ok(Some(account)),
            Err(e) => {
                warn!(error = %e, "discarding malformed session record");
                store.remove(CURRENT_SESSION).await?;
                Ok(None)
            }
        }
    }

    pub async fn save(store: &dyn RecordStore, account: &PublicAccount) -> anyhow::Result<()> {
        let text = serde_json::to_string(account)?;
        store.write(CURRENT_SESSION, &text).await
    }

    pub async fn clear(store: &dyn RecordStore) -> anyhow::Result<()> {
        store.remove(CURRENT_SESSION).await
    }
}
