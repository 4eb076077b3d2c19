//! Login, logout, and session inspection.

use game_harbor_client::GameHarborApi;
use game_harbor_core::{Email, Role};

use super::CliError;

/// Authenticate and persist the session.
pub async fn login(
    api: &GameHarborApi,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let role: Role = role
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("role must be CLIENT or ADMIN, got {role}")))?;

    let session = api.auth.login(&email, password, role).await?;

    match &session.identity {
        Some(identity) => tracing::info!("logged in as {} ({role})", identity.name()),
        None => tracing::warn!(
            "logged in as {email} ({role}), but no directory record matches - \
             cart and profile are unavailable until the directory catches up"
        ),
    }
    Ok(())
}

/// Destroy the session.
pub fn logout(api: &GameHarborApi) -> Result<(), CliError> {
    api.auth.logout()?;
    Ok(())
}

/// Show the persisted session.
pub fn whoami(api: &GameHarborApi) {
    match api.auth.session() {
        Some(session) => {
            let name = session
                .identity
                .as_ref()
                .map_or("<unresolved>", |i| i.name());
            tracing::info!("{} <{}> role {}", name, session.email, session.role);
        }
        None => tracing::info!("not logged in"),
    }
}
