//! Camera access
//!
//! The platform side (device enumeration, media streams) sits behind
//! [`CameraBackend`] and [`VideoStream`]. [`StreamHandle`] pairs every opened
//! stream with exactly one release.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("No camera found")]
    NoDevice,

    #[error("Camera not available: {0}")]
    DeviceNotFound(String),

    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera busy: {0}")]
    Busy(String),

    #[error("Camera stream already released")]
    Released,

    #[error("Failed to capture frame: {0}")]
    Capture(String),
}

/// Video input as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDevice {
    pub device_id: String,
    pub label: String,
}

/// One grayscale video frame
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub luma: Vec<u8>,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.luma.len())
            .finish()
    }
}

/// Live stream from one device
#[async_trait]
pub trait VideoStream: Send + Sync {
    fn device_id(&self) -> &str;

    /// Grab the current frame.
    async fn capture_frame(&self) -> Result<Frame, CameraError>;

    /// Stop every track of the stream and free the device.
    fn stop_tracks(&self);
}

#[async_trait]
pub trait CameraBackend: Send + Sync {
    async fn list_video_inputs(&self) -> Result<Vec<VideoDevice>, CameraError>;

    async fn open(&self, device_id: &str) -> Result<Box<dyn VideoStream>, CameraError>;
}

/// Owned stream that stops its tracks exactly once
///
/// Released explicitly with [`StreamHandle::release`] or on drop, whichever
/// comes first. Frames can no longer be captured afterwards.
pub struct StreamHandle {
    stream: Box<dyn VideoStream>,
    released: AtomicBool,
}

impl StreamHandle {
    pub fn new(stream: Box<dyn VideoStream>) -> Self {
        Self {
            stream,
            released: AtomicBool::new(false),
        }
    }

    pub fn device_id(&self) -> &str {
        self.stream.device_id()
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    pub async fn capture_frame(&self) -> Result<Frame, CameraError> {
        if self.is_released() {
            return Err(CameraError::Released);
        }
        self.stream.capture_frame().await
    }

    /// Stop the tracks. Later calls do nothing.
    pub fn release(&self) {
        if self
            .released
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            tracing::debug!(device = %self.device_id(), "Stopping camera tracks");
            self.stream.stop_tracks();
        }
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("device_id", &self.device_id())
            .field("released", &self.is_released())
            .finish()
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.release();
    }
}
