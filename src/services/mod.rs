pub mod api;
pub mod liveness;
pub mod sanitizer;
pub mod session_guard;
