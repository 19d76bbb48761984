pub mod app_state;
pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware_auth;
pub mod models;
pub mod store;

pub use app_state::AppState;
pub use auth::*;
pub use config::Config;
pub use errors::*;
pub use models::*;
