//! IMS Client - HTTP client for the inventory backend
//!
//! Thin wrappers around the backend REST endpoints, the session context that
//! owns the access token, and the transports the wrappers run on.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use api::ImsClient;
pub use client::{HttpClient, NetworkHttpClient, UploadFile};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{FileSessionStore, Session, SessionContext, SessionStore, SessionStoreError};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse};
pub use shared::response::ApiResponse;
