//! Actix middleware shared by every route.

pub mod timeout;
pub mod trace;

pub use timeout::{DEFAULT_REQUEST_TIMEOUT, Timeout};
pub use trace::Trace;
