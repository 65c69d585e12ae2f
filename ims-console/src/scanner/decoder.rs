//! Barcode decoding seam

use async_trait::async_trait;
use thiserror::Error;

use super::camera::Frame;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unreadable frame: {0}")]
    Frame(String),

    #[error("Decoder failure: {0}")]
    Backend(String),
}

/// One decode attempt per frame
///
/// `Ok(None)` means no code in the frame, which is the normal outcome for
/// most frames and not an error.
#[async_trait]
pub trait BarcodeDecoder: Send + Sync {
    async fn decode(&self, frame: &Frame) -> Result<Option<String>, DecodeError>;
}
