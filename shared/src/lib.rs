//! Shared types for the inventory console
//!
//! Wire types used by both the HTTP client and the console view-models:
//! the response envelope, auth DTOs and the inventory data model.

pub mod client;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
