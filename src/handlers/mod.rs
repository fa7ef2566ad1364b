// handlers/mod.rs - Two-tier handler layout
//
// Public (login flow, no session) → Protected (session required, see middleware::auth)
pub mod public;
pub mod protected;

pub use public::*;
pub use protected::*;
