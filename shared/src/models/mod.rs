//! Data models
//!
//! Inventory records as exchanged with the backend. Field names are
//! camelCase on the wire; identifiers are opaque, server-assigned strings.

pub mod batch;
pub mod dashboard;
pub mod master;
pub mod resource;
pub mod role;
pub mod user;

// Re-exports
pub use batch::*;
pub use dashboard::*;
pub use master::*;
pub use resource::*;
pub use role::*;
pub use user::*;
