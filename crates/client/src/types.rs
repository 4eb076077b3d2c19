//! Domain types for the storefront REST API.
//!
//! Read models are client-held copies of backend-owned records: they are
//! deserialized fresh on every fetch and discarded when the owning view goes
//! away. Nothing here is mutated locally and assumed persisted - every
//! mutation is followed by a re-fetch of the affected collection.
//!
//! The backend speaks camelCase JSON; the serde renames keep the Rust side
//! snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_harbor_core::{
    AdminId, CategoryId, ClientId, Email, ItemId, OrderId, OrderStatus, Price, Role,
};

// =============================================================================
// Catalog
// =============================================================================

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Backend id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

/// A catalog item (read model).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Backend id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price. Server value, never recomputed client-side.
    pub price: Price,
    /// Units in stock.
    pub stock: i32,
    /// Owning category, when the backend embeds it.
    #[serde(default)]
    pub category: Option<Category>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image location.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Payload for creating or updating an item.
///
/// Callers coerce field types before building this (price already parsed to
/// a decimal, stock to an integer); the client performs no further
/// validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub name: String,
    pub price: Price,
    pub stock: i32,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInput {
    pub name: String,
}

// =============================================================================
// Accounts
// =============================================================================

/// A customer directory record (read model).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientAccount {
    /// Backend id.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Login email, unique per directory.
    pub email: Email,
    /// Shipping address, when on file.
    #[serde(default)]
    pub address: Option<String>,
}

/// An admin directory record (read model).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccount {
    /// Backend id.
    pub id: AdminId,
    /// Display name.
    pub name: String,
    /// Login email, unique per directory.
    pub email: Email,
}

/// Payload for registering or updating a customer account.
#[derive(Debug, Clone, Serialize)]
pub struct ClientInput {
    pub name: String,
    pub email: Email,
    /// Required on register; omitted on updates that keep the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Payload for creating or updating an admin account.
#[derive(Debug, Clone, Serialize)]
pub struct AdminInput {
    pub name: String,
    pub email: Email,
    /// Required on create; omitted on updates that keep the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body of the login call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Email,
    pub password: String,
    pub user_type: Role,
}

// =============================================================================
// Cart
// =============================================================================

/// One line of a cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// The item in the cart.
    pub item: Item,
    /// Units of the item. Never zero in a server snapshot; reducing a line
    /// to zero removes it instead.
    pub quantity: u32,
    /// Server-computed line subtotal.
    pub subtotal: Price,
}

/// A point-in-time read of a client's cart.
///
/// Fetched fresh per view and never cached beyond it. `total` is the server
/// value; the client does not sum subtotals independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Cart lines in server order.
    pub items: Vec<CartLine>,
    /// Authoritative cart total.
    pub total: Price,
}

impl CartSnapshot {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Payload for adding an item to a cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Payload for changing the quantity of a cart line.
#[derive(Debug, Clone, Serialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// The ordered item as it was at order time.
    pub item: Item,
    /// Units ordered.
    pub quantity: u32,
    /// Server-computed line subtotal.
    pub subtotal: Price,
}

/// An order (read model). Status transitions happen server-side; the client
/// only displays the current state or requests a transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend id.
    pub id: OrderId,
    /// Owning customer.
    pub client_id: ClientId,
    /// Order lines in server order.
    #[serde(default)]
    pub items: Vec<OrderLine>,
    /// Authoritative order total.
    pub total: Price,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When payment was recorded, if it was.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
}

/// Payload for recording a payment against an order.
///
/// Forwarded to the backend verbatim; the client attaches no meaning to the
/// fields beyond serializing them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Payment method label (e.g., "card", "pix").
    pub method: String,
    /// Processor reference, when the shell has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Payload for requesting an order status transition.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_backend_shape() {
        let raw = r#"{
            "id": 3,
            "name": "Starfall",
            "price": 59.9,
            "stock": 12,
            "category": {"id": 1, "name": "RPG"},
            "imageUrl": "/img/starfall.png"
        }"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id, ItemId::new(3));
        assert_eq!(item.price.display(), "59.90");
        assert_eq!(item.category.unwrap().name, "RPG");
        assert_eq!(item.image_url.as_deref(), Some("/img/starfall.png"));
        assert!(item.description.is_none());
    }

    #[test]
    fn test_cart_snapshot_empty() {
        let raw = r#"{"items": [], "total": 0}"#;
        let cart: CartSnapshot = serde_json::from_str(raw).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total.display(), "0.00");
    }

    #[test]
    fn test_item_input_omits_absent_fields() {
        let input = ItemInput {
            name: "Starfall".to_string(),
            price: "59.90".parse().unwrap(),
            stock: 5,
            category_id: CategoryId::new(1),
            description: None,
            image_url: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["categoryId"], 1);
        assert!(json.get("description").is_none());
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_login_request_wire_shape() {
        let body = LoginRequest {
            email: Email::parse("a@x.com").unwrap(),
            password: "p".to_string(),
            user_type: Role::Client,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userType"], "CLIENT");
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_order_deserializes_with_payment_date() {
        let raw = r#"{
            "id": 9,
            "clientId": 7,
            "items": [],
            "total": 120.5,
            "status": "SHIPPED",
            "paymentDate": "2025-11-02T14:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(order.payment_date.is_some());
    }
}
