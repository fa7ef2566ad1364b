pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod registry;
pub mod session;
pub mod templates;
