//! Catalog API: uniform CRUD endpoints for products and students over
//! PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use migration::apply_migrations;
pub use routes::{api_routes, common_routes, common_routes_with_ready};
pub use service::{ProductService, StudentService};
pub use state::AppState;
