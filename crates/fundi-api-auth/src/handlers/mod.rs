//! Request handlers for the authentication API.

pub mod me;
pub mod register;

pub use me::{get_me_handler, update_me_handler};
pub use register::register_handler;
