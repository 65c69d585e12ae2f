//! Barcode scanner and generator page
//!
//! Wires camera selection, the scan loop and the resolver together. All
//! background work is tied to the page's cancellation token, so nothing
//! updates the page after [`ScannerPage::unmount`].

use std::sync::Arc;
use std::time::Duration;

use ims_client::{HttpClient, ImsClient};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::camera::{CameraBackend, CameraError, VideoDevice};
use super::decoder::BarcodeDecoder;
use super::devices::DeviceSelector;
use super::presenter::ScanResultView;
use super::resolver::{ResolverState, ResourceResolver};
use super::scan_loop::{DEFAULT_SCAN_INTERVAL, ScanEvent, ScanLoop, ScanOutput, ScanSender};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notify::Notifier;

pub struct ScannerPage<H: HttpClient> {
    client: ImsClient<H>,
    notifier: Notifier,
    devices: DeviceSelector,
    decoder: Arc<dyn BarcodeDecoder>,
    resolver: ResourceResolver<H>,
    scans: ScanSender,
    /// Feeds the resolver listener; replaced on every listener spawn
    queue: Option<mpsc::UnboundedSender<ScanEvent>>,
    scan_interval: Duration,
    cancel: CancellationToken,
    scan_loop: Option<ScanLoop>,
    listener: Option<JoinHandle<()>>,
    camera_error: Option<String>,
}

impl<H: HttpClient> std::fmt::Debug for ScannerPage<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerPage")
            .field("devices", &self.devices)
            .field("scan_interval", &self.scan_interval)
            .field("scanning", &self.scan_loop.is_some())
            .field("camera_error", &self.camera_error)
            .finish()
    }
}

impl<H: HttpClient + Clone + 'static> ScannerPage<H> {
    pub fn new(
        client: ImsClient<H>,
        camera: Arc<dyn CameraBackend>,
        decoder: Arc<dyn BarcodeDecoder>,
        notifier: Notifier,
    ) -> Self {
        let (scans, _rx) = watch::channel(None);
        Self {
            resolver: ResourceResolver::new(client.clone()),
            client,
            notifier,
            devices: DeviceSelector::new(camera),
            decoder,
            scans: Arc::new(scans),
            queue: None,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            cancel: CancellationToken::new(),
            scan_loop: None,
            listener: None,
            camera_error: None,
        }
    }

    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    /// Start resolving, list cameras and start scanning the first one.
    ///
    /// Camera problems are kept in [`ScannerPage::camera_error`]; manual
    /// lookups and barcode generation keep working.
    pub async fn mount(&mut self) {
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
        }
        self.ensure_listener();

        let found = self.devices.enumerate().await.map(<[VideoDevice]>::len);
        match found {
            Ok(0) => self.set_camera_error(CameraError::NoDevice),
            Ok(_) => self.restart(None).await,
            Err(e) => self.set_camera_error(e),
        }
    }

    fn ensure_listener(&mut self) -> mpsc::UnboundedSender<ScanEvent> {
        if let (Some(_), Some(queue)) = (&self.listener, &self.queue) {
            return queue.clone();
        }
        let (queue, scans) = mpsc::unbounded_channel();
        self.listener = Some(self.resolver.spawn_listener(scans, self.cancel.child_token()));
        self.queue = Some(queue.clone());
        queue
    }

    /// Scan from `device_id` instead. The current stream is stopped first.
    pub async fn switch_device(&mut self, device_id: &str) {
        self.restart(Some(device_id)).await;
    }

    async fn restart(&mut self, device_id: Option<&str>) {
        if let Some(scan_loop) = self.scan_loop.take() {
            scan_loop.stop().await;
        }

        let opened = match device_id {
            Some(id) => self.devices.select(id).await,
            None => self.devices.activate().await,
        };
        let stream = match opened {
            Ok(stream) => {
                self.camera_error = None;
                Some(stream)
            }
            Err(e) => {
                self.set_camera_error(e);
                // A rejected selection leaves the previous stream open
                self.devices
                    .active()
                    .filter(|stream| !stream.is_released())
                    .cloned()
            }
        };

        if let Some(stream) = stream {
            let output = ScanOutput::new(self.scans.clone(), self.ensure_listener());
            self.scan_loop = Some(ScanLoop::start(
                stream,
                self.decoder.clone(),
                output,
                self.scan_interval,
                self.cancel.child_token(),
            ));
        }
    }

    fn set_camera_error(&mut self, e: CameraError) {
        tracing::warn!(error = %e, "Camera unavailable");
        self.camera_error = Some(e.to_string());
    }

    /// Stop scanning and resolving and release the camera.
    pub async fn unmount(&mut self) {
        self.cancel.cancel();
        if let Some(scan_loop) = self.scan_loop.take() {
            scan_loop.stop().await;
        }
        self.devices.release();
        self.queue = None;
        if let Some(listener) = self.listener.take()
            && let Err(e) = listener.await
        {
            tracing::warn!(error = %e, "Resolver listener ended abnormally");
        }
        tracing::debug!("Scanner page unmounted");
    }

    pub fn devices(&self) -> &[VideoDevice] {
        self.devices.devices()
    }

    pub fn selected_device(&self) -> Option<&str> {
        self.devices.selected()
    }

    pub fn camera_error(&self) -> Option<&str> {
        self.camera_error.as_deref()
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_loop.as_ref().is_some_and(ScanLoop::is_running)
    }

    /// Most recent decoded value
    pub fn last_decoded(&self) -> Option<ScanEvent> {
        self.scans.borrow().clone()
    }

    pub fn subscribe_scans(&self) -> watch::Receiver<Option<ScanEvent>> {
        self.scans.subscribe()
    }

    pub fn resolver_state(&self) -> ResolverState {
        self.resolver.state()
    }

    pub fn subscribe_results(&self) -> watch::Receiver<ResolverState> {
        self.resolver.subscribe()
    }

    pub fn result(&self) -> ScanResultView {
        ScanResultView::from(&self.resolver.state())
    }

    /// Look up a typed code, bypassing the camera.
    pub async fn resolve_manual(&self, code: &str) -> ScanResultView {
        self.resolver.resolve(code).await;
        self.result()
    }

    /// Barcode image for a resource id.
    pub async fn generate_barcode(&self, resource_id: &str) -> ConsoleResult<Vec<u8>> {
        let resource_id = resource_id.trim();
        if resource_id.is_empty() {
            self.notifier.error("Please enter a resource ID");
            return Err(ConsoleError::invalid_state("resource id is empty"));
        }
        match self.client.resources().barcode(resource_id).await {
            Ok(png) => {
                tracing::debug!(resource_id = %resource_id, bytes = png.len(), "Barcode generated");
                Ok(png)
            }
            Err(e) => {
                self.notifier.error(e.user_message("Failed to generate barcode"));
                Err(e.into())
            }
        }
    }
}

impl<H: HttpClient> Drop for ScannerPage<H> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
