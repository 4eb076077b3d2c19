//! Per-resource clients over the shared transport.
//!
//! One client per backend resource, each a direct mapping from operations to
//! fixed path templates and verbs. No business logic lives here - callers
//! coerce input types before invoking, and every failure is exactly the
//! transport's classification.

mod admins;
mod cart;
mod categories;
mod clients;
mod items;
mod orders;

pub use admins::AdminsClient;
pub use cart::CartClient;
pub use categories::CategoriesClient;
pub use clients::ClientsClient;
pub use items::ItemsClient;
pub use orders::OrdersClient;
