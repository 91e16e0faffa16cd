use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::error::ProbeError;
use crate::probe::{Prober, TcpConnectProber};
use crate::report::{Reporter, Silent};
use crate::types::{ProbeOutcome, ScanRequest, ScanResult};

/// Scan a request with TCP connect probes and no progress output.
pub async fn scan_tcp(request: &ScanRequest) -> ScanResult {
    Scanner::new(TcpConnectProber).scan(request).await
}

/// Bounded-concurrency scan engine.
///
/// - Limits in-flight probes with a `Semaphore`; the dispatcher acquires a
///   permit before spawning, so a full pool blocks dispatch.
/// - Open ports flow through an `mpsc` channel to a single collector task.
/// - Finished tasks are reaped while dispatching, so the `JoinSet` stays
///   about as large as the pool.
/// - A `CancellationToken` stops dispatch, even while waiting for a permit,
///   and makes not-yet-started probes return without touching the network.
///   Probes already connecting run to their own timeout.
pub struct Scanner<P> {
    prober: Arc<P>,
    reporter: Arc<dyn Reporter>,
}

impl<P: Prober> Scanner<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober: Arc::new(prober),
            reporter: Arc::new(Silent),
        }
    }

    pub fn with_reporter(mut self, reporter: impl Reporter) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// Run to completion. Never fails; an empty result means nothing answered.
    pub async fn scan(&self, request: &ScanRequest) -> ScanResult {
        self.scan_with_cancel(request, CancellationToken::new()).await
    }

    /// Variant that accepts a `CancellationToken` to allow external cancellation.
    pub async fn scan_with_cancel(
        &self,
        request: &ScanRequest,
        cancel: CancellationToken,
    ) -> ScanResult {
        let gate = Arc::new(Semaphore::new(request.capacity()));
        let (tx, mut rx) = mpsc::channel::<u64>(1);
        let mut tasks = JoinSet::new();

        let reporter = self.reporter.clone();
        let collector = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Some(port) = rx.recv().await {
                reporter.open(port);
                open.push(port);
            }
            open
        });

        let target = request.target();
        let timeout = request.timeout();
        let mut dispatched = 0u64;

        for &port in request.ports() {
            if cancel.is_cancelled() {
                break;
            }
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                acquired = gate.clone().acquire_owned() => match acquired {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };
            if cancel.is_cancelled() {
                break;
            }
            while let Some(res) = tasks.try_join_next() {
                reap(res);
            }

            let prober = self.prober.clone();
            let reporter = self.reporter.clone();
            let cancel = cancel.clone();
            let tx = tx.clone();

            tasks.spawn(async move {
                let _permit = permit; // held until the probe finishes

                let outcome = if cancel.is_cancelled() {
                    ProbeOutcome::Errored(port, ProbeError::Cancelled)
                } else {
                    prober.probe(target, port, timeout).await
                };

                match outcome {
                    ProbeOutcome::Open(port) => {
                        if let Err(e) = tx.send(port).await {
                            log::debug!("dropped open port {}: collector gone", e.0);
                        }
                    }
                    ProbeOutcome::Closed(port) => reporter.closed(port),
                    ProbeOutcome::Errored(port, cause) => {
                        log::debug!("port {port} skipped: {cause}");
                    }
                }
            });
            dispatched += 1;
        }

        if cancel.is_cancelled() {
            log::debug!(
                "scan cancelled after dispatching {dispatched} of {} probes",
                request.ports().len()
            );
        }

        while let Some(res) = tasks.join_next().await {
            reap(res);
        }
        drop(tx);
        gate.close();

        let open_ports = match collector.await {
            Ok(open) => open,
            Err(e) => {
                log::debug!("result collector failed: {e}");
                Vec::new()
            }
        };

        ScanResult {
            requested: request.ports().len() as u64,
            dispatched,
            open_ports,
        }
    }
}

fn reap(res: Result<(), JoinError>) {
    if let Err(e) = res {
        log::debug!("probe task failed: {e}");
    }
}
