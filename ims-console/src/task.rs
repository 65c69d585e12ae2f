//! Cancellable repeating task
//!
//! Runs a job on a fixed period. The job is awaited inline, so a run never
//! overlaps the previous one; ticks that fall due while a run is still in
//! progress are skipped rather than queued.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running periodic job
///
/// Dropping the handle cancels the job; [`RepeatingTask::shutdown`] also
/// waits for the current run to be abandoned.
#[derive(Debug)]
pub struct RepeatingTask {
    name: &'static str,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    /// Spawn `job` every `period`, first run immediately.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn_with_token(name, period, CancellationToken::new(), job)
    }

    /// Same as [`RepeatingTask::spawn`], stopped by `cancel` as well.
    pub fn spawn_with_token<F, Fut>(
        name: &'static str,
        period: Duration,
        cancel: CancellationToken,
        mut job: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::debug!(
                task = %name,
                period_ms = period.as_millis() as u64,
                "Repeating task started"
            );

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let run = AssertUnwindSafe(job()).catch_unwind();
                tokio::select! {
                    _ = token.cancelled() => break,
                    result = run => {
                        if let Err(panic_info) = result {
                            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                                (*s).to_string()
                            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                                s.clone()
                            } else {
                                "Unknown panic".to_string()
                            };
                            tracing::error!(
                                task = %name,
                                panic = %panic_msg,
                                "Repeating task run panicked"
                            );
                        }
                    }
                }
            }

            tracing::debug!(task = %name, "Repeating task stopped");
        });

        Self {
            name,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel and wait until the task has exited.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(task = %self.name, error = %e, "Repeating task ended abnormally");
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
