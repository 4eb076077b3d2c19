//! Game Harbor shell - browse the catalog, manage the cart, run the console.
//!
//! # Usage
//!
//! ```bash
//! # Log in as a customer
//! gh-store login -e ana@example.com -p secret
//!
//! # Browse and fill the cart
//! gh-store catalog list --search star
//! gh-store cart add 3
//! gh-store cart checkout
//!
//! # Console (admin session required)
//! gh-store login -e admin@example.com -p secret -r ADMIN
//! gh-store admin dashboard
//! ```
//!
//! The shell is a thin consumer of `game-harbor-client`: every command maps
//! onto SDK calls, and after each one the navigation state and cart badge
//! are re-derived, the CLI analog of a route change.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use game_harbor_client::{AuthSink, ClientConfig, FileStore, GameHarborApi};

mod commands;

/// Fallback session file when `GAME_HARBOR_SESSION_FILE` is unset.
const DEFAULT_SESSION_FILE: &str = ".game-harbor/session.json";

#[derive(Parser)]
#[command(name = "gh-store")]
#[command(author, version, about = "Game Harbor storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Role to log in as (`CLIENT` or `ADMIN`)
        #[arg(short, long, default_value = "CLIENT")]
        role: String,
    },
    /// Destroy the session
    Logout,
    /// Show the persisted session
    Whoami,
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart (client session required)
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Console operations (admin session required)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List items, optionally filtered
    List {
        /// Case-insensitive name filter, applied client-side
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to one category id
        #[arg(short, long)]
        category: Option<i64>,
    },
    /// Show one item
    Show {
        /// Item id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart snapshot
    Show,
    /// Add an item
    Add {
        /// Item id
        item: i64,

        /// Units to add
        #[arg(default_value_t = 1)]
        quantity: u32,
    },
    /// Remove an item
    Remove {
        /// Item id
        item: i64,
    },
    /// Set the quantity of a line (0 removes it)
    SetQty {
        /// Item id
        item: i64,

        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Turn the cart into an order
    Checkout,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Fetch every collection and show counts
    Dashboard,
    /// Create a catalog item
    ItemAdd {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price, decimal (e.g., 59.90)
        #[arg(short, long)]
        price: String,

        /// Units in stock
        #[arg(short, long)]
        stock: i32,

        /// Owning category id
        #[arg(short, long)]
        category: i64,

        /// Long description
        #[arg(short, long)]
        description: Option<String>,

        /// Cover image URL
        #[arg(short, long)]
        image_url: Option<String>,
    },
    /// Replace a catalog item
    ItemUpdate {
        /// Item id
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        price: String,

        #[arg(short, long)]
        stock: i32,

        #[arg(short, long)]
        category: i64,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        image_url: Option<String>,
    },
    /// Delete a catalog item
    ItemDelete {
        /// Item id
        id: i64,
    },
    /// Create a category
    CategoryAdd {
        /// Display name
        name: String,
    },
    /// Delete a category
    CategoryDelete {
        /// Category id
        id: i64,
    },
    /// Request an order status transition
    OrderStatus {
        /// Order id
        id: i64,

        /// Target status (`PROCESSING`, `SHIPPED`, `DELIVERED`, `CANCELLED`)
        status: String,
    },
    /// Delete an order
    OrderDelete {
        /// Order id
        id: i64,
    },
    /// Create an admin account
    AdminAdd {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Delete an admin account
    AdminDelete {
        /// Admin id
        id: i64,
    },
}

/// Sink that turns "go back to login" into a printed hint.
struct LoginHint;

impl AuthSink for LoginHint {
    fn redirect_to_login(&self) {
        tracing::warn!("session ended, run `gh-store login` to continue");
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let session_file = config
        .session_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    let store = Arc::new(FileStore::open(session_file)?);
    let api = GameHarborApi::new(&config, store);
    api.set_auth_sink(Arc::new(LoginHint));

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => commands::account::login(&api, &email, &password, &role).await?,
        Commands::Logout => commands::account::logout(&api)?,
        Commands::Whoami => commands::account::whoami(&api),
        Commands::Catalog { action } => match action {
            CatalogAction::List { search, category } => {
                commands::catalog::list(&api, search.as_deref(), category).await?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&api, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&api).await?,
            CartAction::Add { item, quantity } => {
                commands::cart::add(&api, item, quantity).await?;
            }
            CartAction::Remove { item } => commands::cart::set_quantity(&api, item, 0).await?,
            CartAction::SetQty { item, quantity } => {
                commands::cart::set_quantity(&api, item, quantity).await?;
            }
            CartAction::Clear => commands::cart::clear(&api).await?,
            CartAction::Checkout => commands::cart::checkout(&api).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Dashboard => commands::console::dashboard(&api).await,
            AdminAction::ItemAdd {
                name,
                price,
                stock,
                category,
                description,
                image_url,
            } => {
                commands::console::item_add(
                    &api, &name, &price, stock, category, description, image_url,
                )
                .await?;
            }
            AdminAction::ItemUpdate {
                id,
                name,
                price,
                stock,
                category,
                description,
                image_url,
            } => {
                commands::console::item_update(
                    &api, id, &name, &price, stock, category, description, image_url,
                )
                .await?;
            }
            AdminAction::ItemDelete { id } => commands::console::item_delete(&api, id).await?,
            AdminAction::CategoryAdd { name } => {
                commands::console::category_add(&api, &name).await?;
            }
            AdminAction::CategoryDelete { id } => {
                commands::console::category_delete(&api, id).await?;
            }
            AdminAction::OrderStatus { id, status } => {
                commands::console::order_status(&api, id, &status).await?;
            }
            AdminAction::OrderDelete { id } => commands::console::order_delete(&api, id).await?,
            AdminAction::AdminAdd {
                name,
                email,
                password,
            } => commands::console::admin_add(&api, &name, &email, &password).await?,
            AdminAction::AdminDelete { id } => commands::console::admin_delete(&api, id).await?,
        },
    }

    // Route-change analog: re-derive nav state and badge after every command.
    commands::render_nav(&api).await;

    Ok(())
}
