// handlers/protected/mod.rs - Handlers behind the session gate
//
// Security Level: class password session
// Middleware: middleware::auth::require_session (redirects to /login)
pub mod apps;
pub mod dashboard;

pub use apps::{app_file, app_index};
pub use dashboard::dashboard;
