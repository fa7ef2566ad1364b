// handlers/public/mod.rs - Handlers reachable without a session
//
// Only the login flow lives here. Everything else goes through the
// session gate in middleware::auth.
pub mod login;

pub use login::{login_page, login_submit, logout};
