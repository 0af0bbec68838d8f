use campusmarket::auth::password::hash_password;
use campusmarket::auth::{Account, AccountStatus, Role};
use campusmarket::config::AdminSeed;
use campusmarket::listings::Listing;
use campusmarket::messages::Message;
use campusmarket::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "campusmarket=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;

    if let Some(seed) = state.config.admin_seed.clone() {
        seed_admin(&state, &seed).await?;
    }

    let store = state.store.as_ref();
    let accounts = Account::load_all(store).await?;
    let listings = Listing::load_all(store).await?;
    let messages = Message::load_all(store).await?;
    tracing::info!(
        data_dir = %state.config.data_dir.display(),
        accounts = accounts.len(),
        listings = listings.len(),
        messages = messages.len(),
        "record store ready"
    );

    Ok(())
}

/// Create the configured admin account unless it already exists.
async fn seed_admin(state: &AppState, seed: &AdminSeed) -> anyhow::Result<()> {
    let store = state.store.as_ref();
    let email = seed.email.trim().to_lowercase();
    if Account::find_by_email(store, &email).await?.is_some() {
        tracing::debug!(email = %email, "admin account already present");
        return Ok(());
    }
    let hash = hash_password(&seed.password)?;
    let account = Account::create(
        store,
        &seed.name,
        &email,
        &hash,
        Role::Admin,
        AccountStatus::Approved,
    )
    .await?;
    tracing::info!(account_id = %account.id, email = %email, "seeded admin account");
    Ok(())
}
