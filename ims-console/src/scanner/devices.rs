//! Camera selection
//!
//! Devices are listed once. At most one stream is open at any time: the
//! current stream is released before the next one is requested.

use std::sync::Arc;

use super::camera::{CameraBackend, CameraError, StreamHandle, VideoDevice};

pub struct DeviceSelector {
    backend: Arc<dyn CameraBackend>,
    devices: Option<Vec<VideoDevice>>,
    selected: Option<String>,
    active: Option<Arc<StreamHandle>>,
}

impl std::fmt::Debug for DeviceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSelector")
            .field("devices", &self.devices)
            .field("selected", &self.selected)
            .field("active", &self.active)
            .finish()
    }
}

impl DeviceSelector {
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        Self {
            backend,
            devices: None,
            selected: None,
            active: None,
        }
    }

    /// List video inputs on first call and select the first one.
    pub async fn enumerate(&mut self) -> Result<&[VideoDevice], CameraError> {
        if self.devices.is_none() {
            let devices = self.backend.list_video_inputs().await?;
            tracing::info!(count = devices.len(), "Video inputs enumerated");
            if self.selected.is_none() {
                self.selected = devices.first().map(|d| d.device_id.clone());
            }
            self.devices = Some(devices);
        }
        Ok(self.devices.as_deref().unwrap_or_default())
    }

    pub fn devices(&self) -> &[VideoDevice] {
        self.devices.as_deref().unwrap_or_default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn active(&self) -> Option<&Arc<StreamHandle>> {
        self.active.as_ref()
    }

    /// Open the selected device, replacing any open stream.
    pub async fn activate(&mut self) -> Result<Arc<StreamHandle>, CameraError> {
        let device_id = self.selected.clone().ok_or(CameraError::NoDevice)?;
        self.open(device_id).await
    }

    /// Switch to `device_id`.
    pub async fn select(&mut self, device_id: &str) -> Result<Arc<StreamHandle>, CameraError> {
        if !self.devices().iter().any(|d| d.device_id == device_id) {
            return Err(CameraError::DeviceNotFound(device_id.to_string()));
        }
        self.selected = Some(device_id.to_string());
        self.open(device_id.to_string()).await
    }

    async fn open(&mut self, device_id: String) -> Result<Arc<StreamHandle>, CameraError> {
        self.release();
        let stream = self.backend.open(&device_id).await?;
        tracing::info!(device = %device_id, "Camera stream opened");
        let handle = Arc::new(StreamHandle::new(stream));
        self.active = Some(handle.clone());
        Ok(handle)
    }

    /// Stop the current stream, if any.
    pub fn release(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.release();
        }
    }
}

impl Drop for DeviceSelector {
    fn drop(&mut self) {
        self.release();
    }
}
