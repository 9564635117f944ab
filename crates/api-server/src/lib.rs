pub mod admin_rest;
pub mod auth;
pub mod rest;
pub mod router;
pub mod server;
pub mod swagger;

pub use rest::AppState;
pub use server::ApiServer;
