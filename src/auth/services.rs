use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::dto::{
    ChangePasswordRequest, LoginRequest, PublicAccount, RegisterRequest, UpdateNameRequest,
};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::{Account, AccountStatus, Role};
use crate::auth::session::Session;
use crate::error::{Error, Result};
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Register a new member. The account starts as `pending` and stays unusable
/// until an admin approves it.
pub async fn register(state: &AppState, mut req: RegisterRequest) -> Result<PublicAccount> {
    req.email = req.email.trim().to_lowercase();
    let name = req.name.trim();
    let store = state.store.as_ref();

    if name.is_empty() {
        return Err(Error::validation("Name is required"));
    }
    if !is_valid_email(&req.email) {
        warn!(email = %req.email, "invalid email");
        return Err(Error::validation("Invalid email"));
    }
    let suffix = format!("@{}", state.config.allowed_email_domain);
    if !req.email.ends_with(&suffix) {
        warn!(email = %req.email, "email outside the allowed domain");
        return Err(Error::validation(format!(
            "Only {suffix} email addresses are allowed"
        )));
    }
    if req.password.len() < 8 {
        return Err(Error::validation("Password too short"));
    }
    if req.password != req.confirm_password {
        return Err(Error::validation("Passwords do not match"));
    }
    if Account::find_by_email(store, &req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(Error::validation("Email already registered"));
    }

    let hash = hash_password(&req.password)?;
    let account = Account::create(
        store,
        name,
        &req.email,
        &hash,
        Role::User,
        AccountStatus::Pending,
    )
    .await?;

    info!(account_id = %account.id, email = %account.email, "account registered, pending approval");
    Ok(account.public())
}

/// Log in and persist the session record. Only approved accounts get a session.
pub async fn login(state: &AppState, mut req: LoginRequest) -> Result<PublicAccount> {
    req.email = req.email.trim().to_lowercase();
    let store = state.store.as_ref();

    let account = Account::find_by_email(store, &req.email)
        .await?
        .ok_or_else(|| Error::validation("Account not found. Please register first."))?;

    if !verify_password(&req.password, &account.password_hash)? {
        warn!(email = %req.email, "login with incorrect password");
        return Err(Error::validation("Incorrect password"));
    }

    match account.status {
        AccountStatus::Pending => {
            return Err(Error::validation("Your account is pending admin approval."))
        }
        AccountStatus::Rejected => {
            return Err(Error::validation("Your registration has been rejected."))
        }
        AccountStatus::Approved => {}
    }

    let public = account.public();
    Session::save(store, &public).await?;
    info!(account_id = %public.id, "login successful");
    Ok(public)
}

pub async fn logout(state: &AppState) -> Result<()> {
    Session::clear(state.store.as_ref()).await?;
    info!("logged out");
    Ok(())
}

/// Resolve the current actor from the persisted session. A session pointing
/// at an account that no longer exists degrades to logged-out.
pub async fn current(state: &AppState) -> Result<Option<PublicAccount>> {
    let store = state.store.as_ref();
    let Some(session) = Session::load(store).await? else {
        return Ok(None);
    };
    match Account::find_by_id(store, session.id).await? {
        Some(account) => Ok(Some(account.public())),
        None => {
            warn!(account_id = %session.id, "session references a missing account");
            Session::clear(store).await?;
            Ok(None)
        }
    }
}

/// Rename the account, refreshing the session record if it is the one logged in.
pub async fn update_name(
    state: &AppState,
    account_id: Uuid,
    req: UpdateNameRequest,
) -> Result<PublicAccount> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(Error::validation("Name is required"));
    }
    let store = state.store.as_ref();

    let mut accounts = Account::load_all(store).await?;
    let account = accounts
        .iter_mut()
        .find(|a| a.id == account_id)
        .ok_or(Error::NotFound("account"))?;
    account.name = name.to_string();
    let public = account.public();
    Account::save_all(store, &accounts).await?;

    if let Some(session) = Session::load(store).await? {
        if session.id == account_id {
            Session::save(store, &public).await?;
        }
    }

    info!(account_id = %account_id, "profile name updated");
    Ok(public)
}

pub async fn change_password(
    state: &AppState,
    account_id: Uuid,
    req: ChangePasswordRequest,
) -> Result<()> {
    if req.new_password != req.confirm_password {
        return Err(Error::validation("New passwords do not match."));
    }
    if req.new_password.len() < 8 {
        return Err(Error::validation("Password too short"));
    }
    let store = state.store.as_ref();

    let mut accounts = Account::load_all(store).await?;
    let account = accounts
        .iter_mut()
        .find(|a| a.id == account_id)
        .ok_or(Error::NotFound("account"))?;

    if !verify_password(&req.current_password, &account.password_hash)? {
        return Err(Error::validation("Current password is incorrect."));
    }

    account.password_hash = hash_password(&req.new_password)?;
    Account::save_all(store, &accounts).await?;
    info!(account_id = %account_id, "password changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_req(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: password.into(),
        }
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    async fn approve(state: &AppState, email: &str) {
        let store = state.store.as_ref();
        let mut accounts = Account::load_all(store).await.expect("load");
        accounts
            .iter_mut()
            .find(|a| a.email == email)
            .expect("account exists")
            .status = AccountStatus::Approved;
        Account::save_all(store, &accounts).await.expect("save");
    }

    #[tokio::test]
    async fn register_rejects_foreign_domain() {
        let state = AppState::fake();
        let err = register(&state, register_req("Asha", "x@gmail.com", "password1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("@mitsgwl.ac.in"));
        // Nothing was persisted.
        let accounts = Account::load_all(state.store.as_ref()).await.expect("load");
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn register_creates_pending_account_with_hashed_password() {
        let state = AppState::fake();
        let public = register(&state, register_req("Asha", "x@mitsgwl.ac.in", "password1"))
            .await
            .expect("register");
        assert_eq!(public.status, AccountStatus::Pending);
        assert_eq!(public.role, Role::User);

        let accounts = Account::load_all(state.store.as_ref()).await.expect("load");
        assert_eq!(accounts.len(), 1);
        assert_ne!(accounts[0].password_hash, "password1");
        assert!(verify_password("password1", &accounts[0].password_hash).expect("verify"));
    }

    #[tokio::test]
    async fn register_normalizes_email_and_rejects_duplicates() {
        let state = AppState::fake();
        register(&state, register_req("Asha", "  X@MITSGWL.AC.IN ", "password1"))
            .await
            .expect("register");
        let err = register(&state, register_req("Ravi", "x@mitsgwl.ac.in", "password2"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }

    #[tokio::test]
    async fn register_rejects_mismatched_confirmation() {
        let state = AppState::fake();
        let mut req = register_req("Asha", "x@mitsgwl.ac.in", "password1");
        req.confirm_password = "password2".into();
        let err = register(&state, req).await.unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[tokio::test]
    async fn login_is_gated_by_status() {
        let state = AppState::fake();
        register(&state, register_req("Asha", "x@mitsgwl.ac.in", "password1"))
            .await
            .expect("register");

        let err = login(&state, login_req("x@mitsgwl.ac.in", "password1"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("pending admin approval"));

        approve(&state, "x@mitsgwl.ac.in").await;
        let public = login(&state, login_req("x@mitsgwl.ac.in", "password1"))
            .await
            .expect("login");
        assert!(public.is_authenticated());

        // The session record survives and resolves back to the account.
        let resolved = current(&state).await.expect("current").expect("some");
        assert_eq!(resolved.id, public.id);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email() {
        let state = AppState::fake();
        register(&state, register_req("Asha", "x@mitsgwl.ac.in", "password1"))
            .await
            .expect("register");
        approve(&state, "x@mitsgwl.ac.in").await;

        let err = login(&state, login_req("x@mitsgwl.ac.in", "nope-nope"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Incorrect password"));

        let err = login(&state, login_req("y@mitsgwl.ac.in", "password1"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("register first"));
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let state = AppState::fake();
        register(&state, register_req("Asha", "x@mitsgwl.ac.in", "password1"))
            .await
            .expect("register");
        approve(&state, "x@mitsgwl.ac.in").await;
        login(&state, login_req("x@mitsgwl.ac.in", "password1"))
            .await
            .expect("login");

        logout(&state).await.expect("logout");
        assert!(current(&state).await.expect("current").is_none());
    }

    #[tokio::test]
    async fn guard_predicates_require_approval() {
        let pending_admin = PublicAccount {
            id: Uuid::new_v4(),
            name: "Root".into(),
            email: "root@mitsgwl.ac.in".into(),
            role: Role::Admin,
            status: AccountStatus::Pending,
        };
        assert!(!pending_admin.is_authenticated());
        assert!(!pending_admin.is_admin());

        let approved_admin = PublicAccount {
            status: AccountStatus::Approved,
            ..pending_admin
        };
        assert!(approved_admin.is_authenticated());
        assert!(approved_admin.is_admin());
    }

    #[tokio::test]
    async fn update_name_refreshes_the_session() {
        let state = AppState::fake();
        register(&state, register_req("Asha", "x@mitsgwl.ac.in", "password1"))
            .await
            .expect("register");
        approve(&state, "x@mitsgwl.ac.in").await;
        let public = login(&state, login_req("x@mitsgwl.ac.in", "password1"))
            .await
            .expect("login");

        update_name(
            &state,
            public.id,
            UpdateNameRequest {
                name: "Asha K".into(),
            },
        )
        .await
        .expect("update");

        let session = Session::load(state.store.as_ref())
            .await
            .expect("load")
            .expect("some");
        assert_eq!(session.name, "Asha K");
    }

    #[tokio::test]
    async fn change_password_verifies_the_current_one() {
        let state = AppState::fake();
        let public = register(&state, register_req("Asha", "x@mitsgwl.ac.in", "password1"))
            .await
            .expect("register");
        approve(&state, "x@mitsgwl.ac.in").await;

        let err = change_password(
            &state,
            public.id,
            ChangePasswordRequest {
                current_password: "wrong".into(),
                new_password: "password2".into(),
                confirm_password: "password2".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Current password is incorrect"));

        change_password(
            &state,
            public.id,
            ChangePasswordRequest {
                current_password: "password1".into(),
                new_password: "password2".into(),
                confirm_password: "password2".into(),
            },
        )
        .await
        .expect("change");

        login(&state, login_req("x@mitsgwl.ac.in", "password2"))
            .await
            .expect("login with new password");
    }
}
