//! Looks up the resource behind each scanned code

use std::sync::Arc;

use ims_client::{HttpClient, ImsClient};
use shared::models::Resource;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::scan_loop::ScanEvent;

/// Shown for every failed lookup, whatever the cause
pub const RESOLVE_ERROR: &str = "failed to fetch resource or unauthorized";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverState {
    /// Code of the last lookup
    pub code: Option<String>,
    pub resource: Option<Resource>,
    pub error: Option<String>,
    pub loading: bool,
}

/// One GET per published code, no retry
#[derive(Debug, Clone)]
pub struct ResourceResolver<H> {
    client: ImsClient<H>,
    state: Arc<watch::Sender<ResolverState>>,
}

impl<H: HttpClient + Clone + 'static> ResourceResolver<H> {
    pub fn new(client: ImsClient<H>) -> Self {
        let (tx, _rx) = watch::channel(ResolverState::default());
        Self {
            client,
            state: Arc::new(tx),
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolverState> {
        self.state.subscribe()
    }

    /// Fetch `code`. Blank codes are ignored.
    pub async fn resolve(&self, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            return;
        }

        self.state.send_modify(|s| {
            s.code = Some(code.to_string());
            s.loading = true;
        });

        let outcome = self.client.resources().get(code).await;
        self.state.send_modify(|s| {
            s.loading = false;
            match outcome {
                Ok(resource) => {
                    s.resource = Some(resource);
                    s.error = None;
                }
                Err(e) => {
                    tracing::warn!(code = %code, error = %e, "Resource lookup failed");
                    s.resource = None;
                    s.error = Some(RESOLVE_ERROR.to_string());
                }
            }
        });
    }

    /// Drop the "looking up" marker of a lookup that will never finish.
    fn abandon(&self) {
        self.state.send_if_modified(|s| {
            if !s.loading {
                return false;
            }
            s.loading = false;
            s.code = None;
            true
        });
    }

    /// Resolve every scan received on `scans` until `cancel` fires.
    ///
    /// Lookups run one at a time, in arrival order; scans queued behind a
    /// slow lookup are each resolved afterwards. Cancelling abandons an
    /// in-flight lookup and drops what is still queued.
    pub fn spawn_listener(
        &self,
        mut scans: mpsc::UnboundedReceiver<ScanEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let resolver = self.clone();
        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    _ = cancel.cancelled() => break,
                    event = scans.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                };

                tokio::select! {
                    _ = cancel.cancelled() => {
                        resolver.abandon();
                        break;
                    }
                    _ = resolver.resolve(&event.value) => {}
                }
            }
            tracing::debug!("Resolver listener stopped");
        })
    }
}
