//! Catalog browsing.

use game_harbor_client::{GameHarborApi, ListResultExt};
use game_harbor_core::{CategoryId, ItemId};

use super::CliError;

/// List catalog items, optionally filtered by name and category.
///
/// The plain listing degrades to an empty catalog when the fetch fails -
/// the one place the empty-state rendering is an accepted trade for error
/// visibility. The category-scoped listing surfaces its errors.
pub async fn list(
    api: &GameHarborApi,
    search: Option<&str>,
    category: Option<i64>,
) -> Result<(), CliError> {
    let items = match category {
        Some(id) => api.items.by_category(CategoryId::new(id)).await?,
        None => api.items.list().await.or_empty(),
    };

    // Name filter applied client-side, like the storefront search box.
    let needle = search.map(str::to_lowercase);
    let items: Vec<_> = items
        .into_iter()
        .filter(|item| {
            needle
                .as_ref()
                .is_none_or(|n| item.name.to_lowercase().contains(n))
        })
        .collect();

    if items.is_empty() {
        tracing::info!("no items");
        return Ok(());
    }

    for item in &items {
        tracing::info!(
            "#{} {} - {} ({} in stock)",
            item.id,
            item.name,
            item.price,
            item.stock
        );
    }
    Ok(())
}

/// Show one item in full.
pub async fn show(api: &GameHarborApi, id: i64) -> Result<(), CliError> {
    let item = api.items.get(ItemId::new(id)).await?;

    tracing::info!("#{} {}", item.id, item.name);
    tracing::info!("price: {}  stock: {}", item.price, item.stock);
    if let Some(category) = &item.category {
        tracing::info!("category: {}", category.name);
    }
    if let Some(description) = &item.description {
        tracing::info!("{description}");
    }
    Ok(())
}
