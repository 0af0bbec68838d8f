use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::store::{JsonFileStore, MemoryStore, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(
            JsonFileStore::open(&config.data_dir)
                .await
                .context("open record store")?,
        ) as Arc<dyn RecordStore>;
        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn RecordStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// In-memory state for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            data_dir: "unused".into(),
            allowed_email_domain: "mitsgwl.ac.in".into(),
            admin_seed: None,
        });
        let store = Arc::new(MemoryStore::default()) as Arc<dyn RecordStore>;
        Self { store, config }
    }
}
