use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{Account, AccountStatus, Role};
use crate::store::{load_collection, save_collection, RecordStore, ACCOUNTS};

impl Account {
    pub async fn load_all(store: &dyn RecordStore) -> anyhow::Result<Vec<Account>> {
        load_collection(store, ACCOUNTS).await
    }

    pub async fn save_all(store: &dyn RecordStore, rows: &[Account]) -> anyhow::Result<()> {
        save_collection(store, ACCOUNTS, rows).await
    }

    /// Find an account by (already normalized) email.
    pub async fn find_by_email(
        store: &dyn RecordStore,
        email: &str,
    ) -> anyhow::Result<Option<Account>> {
        let accounts = Self::load_all(store).await?;
        Ok(accounts.into_iter().find(|a| a.email == email))
    }

    pub async fn find_by_id(store: &dyn RecordStore, id: Uuid) -> anyhow::Result<Option<Account>> {
        let accounts = Self::load_all(store).await?;
        Ok(accounts.into_iter().find(|a| a.id == id))
    }

    /// Append a new account with a hashed password.
    pub async fn create(
        store: &dyn RecordStore,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        status: AccountStatus,
    ) -> anyhow::Result<Account> {
        let account = Account {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            status,
            created_at: OffsetDateTime::now_utc(),
        };
        let mut accounts = Self::load_all(store).await?;
        accounts.push(account.clone());
        Self::save_all(store, &accounts).await?;
        Ok(account)
    }
}
