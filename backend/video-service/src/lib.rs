//! Video Service
//!
//! REST API over an in-memory list of video resources.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::VideoStore;
