use std::path::PathBuf;

use serde::Deserialize;

/// Bootstrap credentials for the first admin account.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub allowed_email_domain: String,
    pub admin_seed: Option<AdminSeed>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = std::env::var("CAMPUSMARKET_DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();
        let allowed_email_domain = std::env::var("CAMPUSMARKET_EMAIL_DOMAIN")
            .unwrap_or_else(|_| "mitsgwl.ac.in".into());

        // Admin seed is optional; only applied when both email and password are set.
        let admin_seed = match (
            std::env::var("CAMPUSMARKET_ADMIN_EMAIL"),
            std::env::var("CAMPUSMARKET_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(AdminSeed {
                name: std::env::var("CAMPUSMARKET_ADMIN_NAME")
                    .unwrap_or_else(|_| "Administrator".into()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            data_dir,
            allowed_email_domain,
            admin_seed,
        })
    }
}
