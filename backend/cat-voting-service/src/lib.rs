/// Cat Voting Service Library
///
/// Registers cat images from The Cat API, records 1-5 votes and serves
/// ranked and raw cat listings over HTTP.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `cat_api`: external image provider client
/// - `names`: random cat name selection
/// - `db`: persistence (Postgres and in-memory stores)
/// - `models`: wire and row types
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod cat_api;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod names;

pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{configure, AppState};
