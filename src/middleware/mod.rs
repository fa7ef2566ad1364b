pub mod auth;

pub use auth::{login_state, require_session, LOGIN_PATH};
