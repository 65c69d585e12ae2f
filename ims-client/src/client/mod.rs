//! Transports
//!
//! [`HttpClient`] is the seam the REST wrappers run on:
//! - [`NetworkHttpClient`]: reqwest over the network
//! - [`OneshotHttpClient`]: in-process calls into an axum `Router`
//!   (requires the "in-process" feature)

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient, UploadFile};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
