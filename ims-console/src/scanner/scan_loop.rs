//! Periodic decode of the live stream

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::camera::StreamHandle;
use super::decoder::BarcodeDecoder;
use crate::task::RepeatingTask;

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(1500);

/// A successful decode
///
/// `seq` grows with every publication, so reading the same code twice still
/// counts as two scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub value: String,
    pub seq: u64,
}

pub type ScanSender = Arc<watch::Sender<Option<ScanEvent>>>;

/// Where decoded values go
///
/// `latest` holds the most recent scan for display. `queue` carries every
/// scan to the resolver, so nothing is lost while a lookup is running.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    latest: ScanSender,
    queue: mpsc::UnboundedSender<ScanEvent>,
}

impl ScanOutput {
    pub fn new(latest: ScanSender, queue: mpsc::UnboundedSender<ScanEvent>) -> Self {
        Self { latest, queue }
    }

    fn publish(&self, value: String) {
        let mut published = None;
        self.latest.send_modify(|slot| {
            let seq = slot.as_ref().map_or(1, |prev| prev.seq + 1);
            let event = ScanEvent { value, seq };
            published = Some(event.clone());
            *slot = Some(event);
        });
        if let Some(event) = published
            && self.queue.send(event).is_err()
        {
            tracing::debug!("Resolver queue closed, scan not resolved");
        }
    }
}

/// Decodes one frame per tick and publishes what it reads
///
/// Runs on a [`RepeatingTask`], so a slow decode delays the next attempt
/// instead of overlapping it.
#[derive(Debug)]
pub struct ScanLoop {
    task: RepeatingTask,
}

impl ScanLoop {
    pub fn start(
        stream: Arc<StreamHandle>,
        decoder: Arc<dyn BarcodeDecoder>,
        output: ScanOutput,
        period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let task = RepeatingTask::spawn_with_token("scan_loop", period, cancel, move || {
            let stream = stream.clone();
            let decoder = decoder.clone();
            let output = output.clone();
            async move { scan_once(&stream, decoder.as_ref(), &output).await }
        });
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    pub async fn stop(self) {
        self.task.shutdown().await;
    }
}

async fn scan_once(stream: &StreamHandle, decoder: &dyn BarcodeDecoder, output: &ScanOutput) {
    let frame = match stream.capture_frame().await {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(device = %stream.device_id(), error = %e, "Frame capture failed");
            return;
        }
    };

    match decoder.decode(&frame).await {
        Ok(Some(value)) if !value.trim().is_empty() => {
            let value = value.trim().to_string();
            tracing::debug!(code = %value, "Barcode decoded");
            output.publish(value);
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "Decode attempt failed"),
    }
}
