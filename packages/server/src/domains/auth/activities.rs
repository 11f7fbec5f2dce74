use anyhow::Context;
use tracing::{info, warn};

use super::password::verify_missing_account;
use super::{hash_password, verify_password, AdminAccount, AuthError, JwtService};
use crate::kernel::BaseAccountStore;

/// Normalise an email for lookups and uniqueness
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check credentials and issue a session token
pub async fn login(
    accounts: &dyn BaseAccountStore,
    jwt: &JwtService,
    email: &str,
    password: &str,
) -> Result<(String, AdminAccount), AuthError> {
    let email = normalize_email(email);

    let account = match accounts.find_by_email(&email).await? {
        Some(account) if verify_password(password, &account.password_hash) => account,
        Some(_) => {
            warn!(email = %email, "Failed admin login");
            return Err(AuthError::InvalidCredentials);
        }
        None => {
            verify_missing_account(password);
            warn!(email = %email, "Failed admin login");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let token = jwt
        .create_token(*account.id.as_uuid(), account.email.clone())
        .context("Failed to issue session token")?;

    info!(admin_id = %account.id, "Admin logged in");
    Ok((token, account))
}

/// Ensure the configured bootstrap admin exists with the configured password
pub async fn bootstrap_admin(
    accounts: &dyn BaseAccountStore,
    email: &str,
    password: &str,
) -> anyhow::Result<AdminAccount> {
    let email = normalize_email(email);
    let display_name = email.split('@').next().unwrap_or("admin").to_string();
    let hash = hash_password(password)?;

    let account = accounts
        .upsert(&email, &display_name, &hash)
        .await
        .context("Failed to upsert bootstrap admin")?;

    info!(admin_id = %account.id, email = %account.email, "Bootstrap admin ready");
    Ok(account)
}
