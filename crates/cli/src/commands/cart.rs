//! Cart commands. All require a client session with a resolved identity.

use game_harbor_client::GameHarborApi;
use game_harbor_core::{ClientId, ItemId};

use super::CliError;

/// The client id of the current session, or the command cannot run.
fn current_client(api: &GameHarborApi) -> Result<ClientId, CliError> {
    api.auth
        .session()
        .and_then(|s| s.identity)
        .and_then(|identity| identity.client_id())
        .ok_or(CliError::NoClientIdentity)
}

/// Show the cart snapshot.
pub async fn show(api: &GameHarborApi) -> Result<(), CliError> {
    let client_id = current_client(api)?;
    let cart = api.cart.get(client_id).await?;

    if cart.is_empty() {
        tracing::info!("Your cart is empty - `gh-store catalog list` to browse");
        return Ok(());
    }

    for line in &cart.items {
        tracing::info!(
            "#{} {} x{} - {}",
            line.item.id,
            line.item.name,
            line.quantity,
            line.subtotal
        );
    }
    tracing::info!("total: {}", cart.total);
    Ok(())
}

/// Add an item to the cart.
pub async fn add(api: &GameHarborApi, item: i64, quantity: u32) -> Result<(), CliError> {
    let client_id = current_client(api)?;
    let cart = api
        .cart
        .add_item(client_id, ItemId::new(item), quantity)
        .await?;
    tracing::info!("added, cart total now {}", cart.total);
    Ok(())
}

/// Set the quantity of a cart line; zero removes the line.
pub async fn set_quantity(api: &GameHarborApi, item: i64, quantity: u32) -> Result<(), CliError> {
    let client_id = current_client(api)?;
    api.cart
        .update_item(client_id, ItemId::new(item), quantity)
        .await?;
    if quantity == 0 {
        tracing::info!("removed");
    } else {
        tracing::info!("quantity set to {quantity}");
    }
    Ok(())
}

/// Empty the cart.
pub async fn clear(api: &GameHarborApi) -> Result<(), CliError> {
    let client_id = current_client(api)?;
    api.cart.clear(client_id).await?;
    tracing::info!("cart cleared");
    Ok(())
}

/// Turn the cart into an order.
pub async fn checkout(api: &GameHarborApi) -> Result<(), CliError> {
    let client_id = current_client(api)?;
    let order = api.orders.checkout(client_id).await?;
    tracing::info!(
        "order #{} placed, total {} ({})",
        order.id,
        order.total,
        order.status
    );
    Ok(())
}
