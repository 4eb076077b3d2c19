//! Console commands: the admin dashboard and catalog/order/account CRUD.
//!
//! The backend enforces authorization; a non-admin session gets the
//! transport's `Forbidden` (or `AuthRequired`) classification back.

use game_harbor_client::types::{AdminInput, CategoryInput, ItemInput};
use game_harbor_client::{AdminDashboard, GameHarborApi};
use game_harbor_core::{AdminId, CategoryId, Email, ItemId, OrderId, OrderStatus, Price};

use super::CliError;

/// Fetch every collection jointly and show counts.
///
/// All-or-nothing: when any fetch fails, every view resets to empty rather
/// than showing partial data, and the failure is reported.
pub async fn dashboard(api: &GameHarborApi) {
    let dashboard = match api.admin_dashboard().await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!("dashboard fetch failed: {e}");
            AdminDashboard::empty()
        }
    };

    tracing::info!("items:      {}", dashboard.items.len());
    tracing::info!("orders:     {}", dashboard.orders.len());
    tracing::info!("clients:    {}", dashboard.clients.len());
    tracing::info!("categories: {}", dashboard.categories.len());
    tracing::info!("admins:     {}", dashboard.admins.len());
}

fn parse_price(raw: &str) -> Result<Price, CliError> {
    raw.parse()
        .map_err(|_| CliError::InvalidArgument(format!("price must be a decimal, got {raw}")))
}

fn item_input(
    name: &str,
    price: &str,
    stock: i32,
    category: i64,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<ItemInput, CliError> {
    Ok(ItemInput {
        name: name.to_string(),
        price: parse_price(price)?,
        stock,
        category_id: CategoryId::new(category),
        description,
        image_url,
    })
}

/// Create a catalog item.
#[allow(clippy::too_many_arguments)]
pub async fn item_add(
    api: &GameHarborApi,
    name: &str,
    price: &str,
    stock: i32,
    category: i64,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<(), CliError> {
    let input = item_input(name, price, stock, category, description, image_url)?;
    api.items.create(&input).await?;
    tracing::info!("item created");
    Ok(())
}

/// Replace a catalog item.
#[allow(clippy::too_many_arguments)]
pub async fn item_update(
    api: &GameHarborApi,
    id: i64,
    name: &str,
    price: &str,
    stock: i32,
    category: i64,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<(), CliError> {
    let input = item_input(name, price, stock, category, description, image_url)?;
    api.items.update(ItemId::new(id), &input).await?;
    tracing::info!("item updated");
    Ok(())
}

/// Delete a catalog item.
pub async fn item_delete(api: &GameHarborApi, id: i64) -> Result<(), CliError> {
    api.items.delete(ItemId::new(id)).await?;
    tracing::info!("item deleted");
    Ok(())
}

/// Create a category.
pub async fn category_add(api: &GameHarborApi, name: &str) -> Result<(), CliError> {
    api.categories
        .create(&CategoryInput {
            name: name.to_string(),
        })
        .await?;
    tracing::info!("category created");
    Ok(())
}

/// Delete a category.
pub async fn category_delete(api: &GameHarborApi, id: i64) -> Result<(), CliError> {
    api.categories.delete(CategoryId::new(id)).await?;
    tracing::info!("category deleted");
    Ok(())
}

/// Request an order status transition.
pub async fn order_status(api: &GameHarborApi, id: i64, status: &str) -> Result<(), CliError> {
    let status: OrderStatus = status.parse().map_err(CliError::InvalidArgument)?;
    api.orders.set_status(OrderId::new(id), status).await?;
    tracing::info!("order #{id} now {status}");
    Ok(())
}

/// Delete an order.
pub async fn order_delete(api: &GameHarborApi, id: i64) -> Result<(), CliError> {
    api.orders.delete(OrderId::new(id)).await?;
    tracing::info!("order deleted");
    Ok(())
}

/// Create an admin account.
pub async fn admin_add(
    api: &GameHarborApi,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    let input = AdminInput {
        name: name.to_string(),
        email: Email::parse(email)?,
        password: Some(password.to_string()),
    };
    api.admins.create(&input).await?;
    tracing::info!("admin account created");
    Ok(())
}

/// Delete an admin account.
pub async fn admin_delete(api: &GameHarborApi, id: i64) -> Result<(), CliError> {
    api.admins.delete(AdminId::new(id)).await?;
    tracing::info!("admin account deleted");
    Ok(())
}
