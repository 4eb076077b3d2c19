//! Shell commands over the SDK.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod console;

use thiserror::Error;

use game_harbor_client::{ApiError, AuthError, GameHarborApi, NavLink, StoreError};
use game_harbor_core::EmailError;

/// Errors a shell command can surface.
#[derive(Debug, Error)]
pub enum CliError {
    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The session file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An email argument did not parse.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// Some other argument did not parse.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The command needs a client session with a resolved identity.
    #[error("log in as a client first (`gh-store login`)")]
    NoClientIdentity,
}

/// Re-derive and print the navigation state and cart badge.
///
/// Runs after every command, the CLI analog of a route change. A failed
/// badge fetch is reported but never fails the command that triggered it.
pub async fn render_nav(api: &GameHarborApi) {
    if let Err(e) = api.sync.refresh().await {
        tracing::warn!("cart badge refresh failed: {e}");
    }

    let nav = api.sync.nav();
    let links = nav
        .links
        .iter()
        .map(|link| match link {
            NavLink::Home => "home",
            NavLink::Catalog => "catalog",
            NavLink::Cart => "cart",
            NavLink::Profile => "profile",
            NavLink::Console => "console",
            NavLink::Login => "login",
            NavLink::Register => "register",
        })
        .collect::<Vec<_>>()
        .join(" | ");

    match (nav.display_name, nav.badge) {
        (Some(name), Some(badge)) => {
            tracing::info!("nav: {links}  [{name}, cart: {badge}]");
        }
        (Some(name), None) => tracing::info!("nav: {links}  [{name}]"),
        _ => tracing::info!("nav: {links}"),
    }
}
