//! Integration test harness for the Game Harbor client.
//!
//! Spins up an in-process fake backend (axum on an ephemeral port) that
//! implements the storefront REST surface over in-memory state, and points a
//! real [`GameHarborApi`] at it. Fault toggles on [`FakeBackend`] let tests
//! exercise the failure classifications without a real outage.
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = TestContext::start(
//!     FakeBackend::default()
//!         .with_client(7, "Ana", "ana@example.com", "secret")
//!         .with_item(3, "Starfall", 59.9, 12),
//! )
//! .await;
//!
//! let session = ctx.api.auth.login(&email, "secret", Role::Client).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use game_harbor_client::{ClientConfig, GameHarborApi, MemoryStore, SessionStore};

/// In-memory backend state plus fault-injection toggles.
///
/// Collections hold raw JSON in the backend's wire shape; the fake never
/// goes through the client's types, so serialization bugs cannot cancel
/// out.
#[derive(Default)]
pub struct FakeBackend {
    pub items: Vec<Value>,
    pub categories: Vec<Value>,
    pub clients: Vec<Value>,
    pub admins: Vec<Value>,
    pub orders: Vec<Value>,
    /// client id -> ordered (item id, quantity) lines.
    pub carts: HashMap<i64, Vec<(i64, u32)>>,
    /// email -> password accepted by the login endpoint.
    pub passwords: HashMap<String, String>,

    /// When set, `GET /order` answers 500 with a message body.
    pub fail_orders: bool,
    /// When set, every endpoint except login answers 401.
    pub require_auth: bool,
    /// When set, every endpoint except login answers 403.
    pub forbid_all: bool,

    /// `PUT` cart updates that arrived with quantity zero. The client
    /// contract says these must be routed to `DELETE` instead, so this
    /// staying at zero is itself an assertion target.
    pub zero_quantity_puts: usize,
    /// Cart lines removed via `DELETE`.
    pub removed_lines: usize,
}

impl FakeBackend {
    /// Seed a customer record and its password.
    #[must_use]
    pub fn with_client(mut self, id: i64, name: &str, email: &str, password: &str) -> Self {
        self.clients
            .push(json!({"id": id, "name": name, "email": email}));
        self.passwords.insert(email.to_string(), password.to_string());
        self
    }

    /// Seed an admin record and its password.
    #[must_use]
    pub fn with_admin(mut self, id: i64, name: &str, email: &str, password: &str) -> Self {
        self.admins
            .push(json!({"id": id, "name": name, "email": email}));
        self.passwords.insert(email.to_string(), password.to_string());
        self
    }

    /// Seed a password without any directory record (degraded-login setup).
    #[must_use]
    pub fn with_password_only(mut self, email: &str, password: &str) -> Self {
        self.passwords.insert(email.to_string(), password.to_string());
        self
    }

    /// Seed a catalog item.
    #[must_use]
    pub fn with_item(mut self, id: i64, name: &str, price: f64, stock: i64) -> Self {
        self.items
            .push(json!({"id": id, "name": name, "price": price, "stock": stock}));
        self
    }

    /// Seed a category.
    #[must_use]
    pub fn with_category(mut self, id: i64, name: &str) -> Self {
        self.categories.push(json!({"id": id, "name": name}));
        self
    }

    /// Seed an order.
    #[must_use]
    pub fn with_order(mut self, id: i64, client_id: i64, total: f64, status: &str) -> Self {
        self.orders.push(json!({
            "id": id,
            "clientId": client_id,
            "items": [],
            "total": total,
            "status": status,
        }));
        self
    }

    fn cart_snapshot(&self, client_id: i64) -> Value {
        let lines = self.carts.get(&client_id).cloned().unwrap_or_default();
        let mut items = Vec::new();
        let mut total = 0.0;
        for (item_id, quantity) in lines {
            let item = self
                .items
                .iter()
                .find(|i| i["id"] == json!(item_id))
                .cloned()
                .unwrap_or_else(
                    || json!({"id": item_id, "name": "unknown", "price": 0.0, "stock": 0}),
                );
            let price = item["price"].as_f64().unwrap_or(0.0);
            let subtotal = price * f64::from(quantity);
            total += subtotal;
            items.push(json!({"item": item, "quantity": quantity, "subtotal": subtotal}));
        }
        json!({"items": items, "total": total})
    }
}

type Shared = Arc<Mutex<FakeBackend>>;

/// A running fake backend and a real client wired to it.
pub struct TestContext {
    /// Client under test.
    pub api: GameHarborApi,
    /// The session store the client persists into.
    pub store: Arc<MemoryStore>,
    /// Mutable backend state, shared with the running server.
    pub state: Shared,
    /// Where the fake backend listens.
    pub addr: SocketAddr,
}

impl TestContext {
    /// Start the fake backend and assemble a client against it.
    ///
    /// # Panics
    ///
    /// Panics when the ephemeral port cannot be bound; tests have no
    /// recovery path from that.
    pub async fn start(backend: FakeBackend) -> Self {
        let state: Shared = Arc::new(Mutex::new(backend));
        let app = router(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let config = ClientConfig::new(
            format!("http://{addr}").parse().expect("listener addr is a valid url"),
        );
        let store = Arc::new(MemoryStore::new());
        let api = GameHarborApi::new(&config, Arc::clone(&store) as Arc<dyn SessionStore>);

        Self {
            api,
            store,
            state,
            addr,
        }
    }

    /// Flip a toggle or inspect counters on the running backend.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut FakeBackend) -> R) -> R {
        let mut state = self.state.lock().expect("backend state lock");
        f(&mut state)
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/item", get(list_items))
        .route("/item/{id}", get(get_item))
        .route("/category", get(list_categories))
        .route("/client", get(list_clients))
        .route("/admin", get(list_admins))
        .route("/order", get(list_orders))
        .route("/order/client/{client_id}", get(orders_for_client))
        .route("/order/{client_id}/checkout", post(checkout))
        .route("/cart/{client_id}", get(get_cart).delete(clear_cart))
        .route("/cart/{client_id}/items", post(add_cart_item))
        .route(
            "/cart/{client_id}/items/{item_id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth_guard,
        ))
        .with_state(state)
}

/// Answers 401 or 403 everywhere but the login endpoint while the matching
/// toggle is on.
async fn auth_guard(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let (require_auth, forbid_all) = {
        let state = state.lock().expect("backend state lock");
        (state.require_auth, state.forbid_all)
    };
    if request.uri().path() != "/api/login" {
        if require_auth {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        if forbid_all {
            return StatusCode::FORBIDDEN.into_response();
        }
    }
    next.run(request).await
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Json<bool> {
    let state = state.lock().expect("backend state lock");
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let ok = state.passwords.get(email).is_some_and(|p| p == password);
    Json(ok)
}

async fn list_items(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(
        state.lock().expect("backend state lock").items.clone(),
    ))
}

async fn get_item(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().expect("backend state lock");
    state.items.iter().find(|i| i["id"] == json!(id)).map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "item not found"})),
            )
                .into_response()
        },
        |item| Json(item.clone()).into_response(),
    )
}

async fn list_categories(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(
        state.lock().expect("backend state lock").categories.clone(),
    ))
}

async fn list_clients(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(
        state.lock().expect("backend state lock").clients.clone(),
    ))
}

async fn list_admins(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(
        state.lock().expect("backend state lock").admins.clone(),
    ))
}

async fn list_orders(State(state): State<Shared>) -> Response {
    let state = state.lock().expect("backend state lock");
    if state.fail_orders {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "orders unavailable"})),
        )
            .into_response();
    }
    Json(Value::Array(state.orders.clone())).into_response()
}

async fn orders_for_client(State(state): State<Shared>, Path(client_id): Path<i64>) -> Json<Value> {
    let state = state.lock().expect("backend state lock");
    let orders = state
        .orders
        .iter()
        .filter(|o| o["clientId"] == json!(client_id))
        .cloned()
        .collect();
    Json(Value::Array(orders))
}

async fn get_cart(State(state): State<Shared>, Path(client_id): Path<i64>) -> Json<Value> {
    let state = state.lock().expect("backend state lock");
    Json(state.cart_snapshot(client_id))
}

async fn add_cart_item(
    State(state): State<Shared>,
    Path(client_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut state = state.lock().expect("backend state lock");
    let item_id = body["itemId"].as_i64().unwrap_or_default();
    let quantity = u32::try_from(body["quantity"].as_i64().unwrap_or(1)).unwrap_or(1);

    let lines = state.carts.entry(client_id).or_default();
    if let Some(line) = lines.iter_mut().find(|(id, _)| *id == item_id) {
        line.1 += quantity;
    } else {
        lines.push((item_id, quantity));
    }
    Json(state.cart_snapshot(client_id))
}

async fn update_cart_item(
    State(state): State<Shared>,
    Path((client_id, item_id)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut state = state.lock().expect("backend state lock");
    let quantity = u32::try_from(body["quantity"].as_i64().unwrap_or_default()).unwrap_or_default();
    if quantity == 0 {
        // The client is expected never to send this.
        state.zero_quantity_puts += 1;
        return StatusCode::BAD_REQUEST;
    }
    if let Some(lines) = state.carts.get_mut(&client_id)
        && let Some(line) = lines.iter_mut().find(|(id, _)| *id == item_id)
    {
        line.1 = quantity;
        return StatusCode::NO_CONTENT;
    }
    StatusCode::NOT_FOUND
}

async fn remove_cart_item(
    State(state): State<Shared>,
    Path((client_id, item_id)): Path<(i64, i64)>,
) -> StatusCode {
    let mut state = state.lock().expect("backend state lock");
    if let Some(lines) = state.carts.get_mut(&client_id) {
        let before = lines.len();
        lines.retain(|(id, _)| *id != item_id);
        if lines.len() < before {
            state.removed_lines += 1;
            return StatusCode::NO_CONTENT;
        }
    }
    StatusCode::NOT_FOUND
}

async fn clear_cart(State(state): State<Shared>, Path(client_id): Path<i64>) -> StatusCode {
    let mut state = state.lock().expect("backend state lock");
    state.carts.remove(&client_id);
    StatusCode::NO_CONTENT
}

async fn checkout(State(state): State<Shared>, Path(client_id): Path<i64>) -> Response {
    let mut state = state.lock().expect("backend state lock");
    let snapshot = state.cart_snapshot(client_id);
    if snapshot["items"].as_array().is_none_or(Vec::is_empty) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "cart is empty"})),
        )
            .into_response();
    }

    let id = i64::try_from(state.orders.len()).unwrap_or_default() + 1;
    let order = json!({
        "id": id,
        "clientId": client_id,
        "items": snapshot["items"],
        "total": snapshot["total"],
        "status": "PROCESSING",
    });
    state.orders.push(order.clone());
    state.carts.remove(&client_id);
    Json(order).into_response()
}
