//! HTTP surface of the ProfileDesk admin profile editor

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use config::HttpSettings;
pub use routes::AppState;
