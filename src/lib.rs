//! Inventory tracker: server-rendered list/add/edit/delete pages over a single SQLite table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod templates;

pub use config::{Settings, TableSchema};
pub use error::{AppError, ConfigError};
pub use migration::apply_schema;
pub use model::{Entity, Item, ItemFields, ITEM_TABLE};
pub use routes::{build_app, item_routes, log_routes, status_routes, ROUTE_TABLE};
pub use service::CrudService;
pub use state::AppState;
pub use store::connect;
pub use templates::Templates;
