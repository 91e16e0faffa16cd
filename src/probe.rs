use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time;

use crate::types::ProbeOutcome;

/// One bounded-time reachability check against `(target, port)`.
///
/// The engine owns cancellation; implementations only classify.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, target: IpAddr, port: u64, timeout: Duration) -> ProbeOutcome;
}

#[async_trait]
impl<P: Prober> Prober for Arc<P> {
    async fn probe(&self, target: IpAddr, port: u64, timeout: Duration) -> ProbeOutcome {
        (**self).probe(target, port, timeout).await
    }
}

/// TCP connect probe.
///
/// Refusal, unreachable networks, timeouts and ports outside `u16` all
/// classify as `Closed`. A successful connection is dropped right away
/// without reading or writing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber;

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, target: IpAddr, port: u64, timeout: Duration) -> ProbeOutcome {
        let Ok(tcp_port) = u16::try_from(port) else {
            log::debug!("port {port} is not addressable over TCP");
            return ProbeOutcome::Closed(port);
        };

        let addr = SocketAddr::new(target, tcp_port);
        match time::timeout(timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeOutcome::Open(port)
            }
            Ok(Err(e)) => {
                log::debug!("connect to {addr} failed: {e}");
                ProbeOutcome::Closed(port)
            }
            Err(_) => {
                log::debug!("connect to {addr} timed out after {timeout:?}");
                ProbeOutcome::Closed(port)
            }
        }
    }
}
