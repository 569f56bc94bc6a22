//! Cookie-based authentication: logging in and out, registration, and the
//! middleware that guards the API routes.

pub(crate) mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod register;

pub use log_in::post_log_in;
pub use log_out::post_log_out;
pub use middleware::{AuthState, auth_guard};
pub use register::post_register;
