//! Middleware components for the HTTP server

pub mod cors;
pub mod logging;
pub mod panic;
pub mod rate_limit;
