//! Cart behavior: badge synchronization, zero-quantity routing, checkout.

#![allow(clippy::unwrap_used)]

use game_harbor_core::{Email, ItemId, OrderStatus, Role};
use game_harbor_integration_tests::{FakeBackend, TestContext};

use game_harbor_client::NavLink;

async fn logged_in_ctx() -> TestContext {
    let ctx = TestContext::start(
        FakeBackend::default()
            .with_client(7, "Ana", "ana@example.com", "secret")
            .with_item(3, "Starfall", 59.9, 12)
            .with_item(4, "Dune Racer", 39.9, 5),
    )
    .await;

    let email = Email::parse("ana@example.com").unwrap();
    ctx.api.auth.login(&email, "secret", Role::Client).await.unwrap();
    ctx
}

fn client_id(ctx: &TestContext) -> game_harbor_core::ClientId {
    ctx.api
        .auth
        .session()
        .unwrap()
        .identity
        .unwrap()
        .client_id()
        .unwrap()
}

#[tokio::test]
async fn badge_equals_lines_of_latest_completed_fetch() {
    let ctx = logged_in_ctx().await;
    let id = client_id(&ctx);

    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(0));

    ctx.api.cart.add_item(id, ItemId::new(3), 1).await.unwrap();
    ctx.api.cart.add_item(id, ItemId::new(4), 2).await.unwrap();
    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(2));

    // Badge counts lines, not units.
    ctx.api.cart.add_item(id, ItemId::new(3), 5).await.unwrap();
    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(2));

    ctx.api.cart.remove_item(id, ItemId::new(4)).await.unwrap();
    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(1));
}

#[tokio::test]
async fn badge_absent_after_logout_regardless_of_prior_value() {
    let ctx = logged_in_ctx().await;
    let id = client_id(&ctx);

    ctx.api.cart.add_item(id, ItemId::new(3), 1).await.unwrap();
    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(1));

    ctx.api.auth.logout().unwrap();

    assert_eq!(ctx.api.sync.refresh().await.unwrap(), None);
    assert!(ctx.api.sync.nav().badge.is_none());
}

#[tokio::test]
async fn badge_suppressed_for_admin_sessions() {
    let ctx = TestContext::start(
        FakeBackend::default().with_admin(4, "Root", "root@example.com", "hunter2"),
    )
    .await;

    let email = Email::parse("root@example.com").unwrap();
    ctx.api.auth.login(&email, "hunter2", Role::Admin).await.unwrap();

    // Admins never qualify for a cart fetch; badge is absent, not zero.
    assert_eq!(ctx.api.sync.refresh().await.unwrap(), None);
}

#[tokio::test]
async fn zero_quantity_update_routes_to_removal() {
    let ctx = logged_in_ctx().await;
    let id = client_id(&ctx);

    ctx.api.cart.add_item(id, ItemId::new(3), 2).await.unwrap();

    // Reducing to zero must arrive at the backend as a DELETE, never as a
    // zero-quantity PUT.
    ctx.api.cart.update_item(id, ItemId::new(3), 0).await.unwrap();

    ctx.with_state(|s| {
        assert_eq!(s.zero_quantity_puts, 0);
        assert_eq!(s.removed_lines, 1);
    });

    let cart = ctx.api.cart.get(id).await.unwrap();
    assert!(cart.is_empty());
}

#[tokio::test]
async fn nonzero_update_stays_a_quantity_change() {
    let ctx = logged_in_ctx().await;
    let id = client_id(&ctx);

    ctx.api.cart.add_item(id, ItemId::new(3), 1).await.unwrap();
    ctx.api.cart.update_item(id, ItemId::new(3), 4).await.unwrap();

    ctx.with_state(|s| assert_eq!(s.removed_lines, 0));

    let cart = ctx.api.cart.get(id).await.unwrap();
    assert_eq!(cart.items.first().map(|l| l.quantity), Some(4));
}

#[tokio::test]
async fn fresh_client_sees_empty_cart_and_suppressed_badge() {
    // The end-to-end login scenario: one matching directory record, empty
    // cart, badge at zero, client links visible.
    let ctx = TestContext::start(
        FakeBackend::default().with_client(7, "Ana", "a@x.com", "p"),
    )
    .await;

    let email = Email::parse("a@x.com").unwrap();
    let session = ctx.api.auth.login(&email, "p", Role::Client).await.unwrap();
    assert_eq!(session.identity.as_ref().map(|i| i.name()), Some("Ana"));

    let cart = ctx.api.cart.get(client_id(&ctx)).await.unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.total.display(), "0.00");

    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(0));
    let nav = ctx.api.sync.nav();
    assert!(nav.links.contains(&NavLink::Cart));
    assert!(nav.links.contains(&NavLink::Catalog));
    assert_eq!(nav.display_name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn checkout_turns_cart_into_processing_order() {
    let ctx = logged_in_ctx().await;
    let id = client_id(&ctx);

    ctx.api.cart.add_item(id, ItemId::new(3), 2).await.unwrap();

    let order = ctx.api.orders.checkout(id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.client_id, id);
    assert_eq!(order.items.len(), 1);

    // The cart is spent; the badge reflects the fresh fetch.
    assert_eq!(ctx.api.sync.refresh().await.unwrap(), Some(0));

    let orders = ctx.api.orders.for_client(id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.first().map(|o| o.id), Some(order.id));
}
