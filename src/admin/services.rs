use tracing::info;
use uuid::Uuid;

use crate::auth::{Account, AccountStatus, PublicAccount, Role};
use crate::error::{Error, Result};
use crate::listings::Listing;
use crate::state::AppState;

fn require_admin(actor: &PublicAccount) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Error::PermissionDenied("admin access required"))
    }
}

/// Accounts waiting for a moderation decision.
pub async fn pending_accounts(
    state: &AppState,
    actor: &PublicAccount,
) -> Result<Vec<PublicAccount>> {
    require_admin(actor)?;
    let accounts = Account::load_all(state.store.as_ref()).await?;
    Ok(accounts
        .iter()
        .filter(|a| a.status == AccountStatus::Pending)
        .map(Account::public)
        .collect())
}

/// All non-admin accounts, whatever their status.
pub async fn member_accounts(
    state: &AppState,
    actor: &PublicAccount,
) -> Result<Vec<PublicAccount>> {
    require_admin(actor)?;
    let accounts = Account::load_all(state.store.as_ref()).await?;
    Ok(accounts
        .iter()
        .filter(|a| a.role != Role::Admin)
        .map(Account::public)
        .collect())
}

async fn set_status(
    state: &AppState,
    actor: &PublicAccount,
    account_id: Uuid,
    status: AccountStatus,
) -> Result<PublicAccount> {
    require_admin(actor)?;
    let store = state.store.as_ref();

    let mut accounts = Account::load_all(store).await?;
    let account = accounts
        .iter_mut()
        .find(|a| a.id == account_id)
        .ok_or(Error::NotFound("account"))?;
    if account.role == Role::Admin {
        return Err(Error::PermissionDenied("admin accounts are not moderated"));
    }
    account.status = status;
    let public = account.public();
    Account::save_all(store, &accounts).await?;
    info!(
        account_id = %account_id,
        status = ?status,
        moderator = %actor.id,
        "account status changed"
    );
    Ok(public)
}

/// Approve an account. Also reachable from `rejected`, so an admin can
/// reverse a mistaken rejection.
pub async fn approve_account(
    state: &AppState,
    actor: &PublicAccount,
    account_id: Uuid,
) -> Result<PublicAccount> {
    set_status(state, actor, account_id, AccountStatus::Approved).await
}

pub async fn reject_account(
    state: &AppState,
    actor: &PublicAccount,
    account_id: Uuid,
) -> Result<PublicAccount> {
    set_status(state, actor, account_id, AccountStatus::Rejected).await
}

/// Remove any listing, regardless of owner.
pub async fn delete_listing(
    state: &AppState,
    actor: &PublicAccount,
    listing_id: Uuid,
) -> Result<()> {
    require_admin(actor)?;
    if !Listing::remove_by_id(state.store.as_ref(), listing_id).await? {
        return Err(Error::NotFound("listing"));
    }
    info!(listing_id = %listing_id, moderator = %actor.id, "listing removed by admin");
    Ok(())
}
