pub mod api;
pub mod config;
pub mod database;
pub mod events;
pub mod models;
pub mod services;
pub mod shared;

pub use api::middleware::error::{ApiError, ApiResult, FieldErrors};
pub use api::middleware::state::AppState;
pub use config::*;
pub use database::Database;
pub use models::*;
pub use services::*;
