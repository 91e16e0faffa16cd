use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use tcp_sweep::probe::{Prober, TcpConnectProber};
use tcp_sweep::types::ProbeOutcome;
use tokio::net::TcpListener;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[tokio::test]
async fn refused_connection_is_closed() {
    let port = {
        let l = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        l.local_addr().unwrap().port() as u64
    };
    let outcome = TcpConnectProber
        .probe(LOCALHOST, port, Duration::from_millis(500))
        .await;
    assert_eq!(outcome, ProbeOutcome::Closed(port));
}

#[tokio::test]
async fn unanswered_connect_is_closed_within_timeout() {
    // Non-routable; either times out or fails fast, never open.
    let target = IpAddr::V4(Ipv4Addr::new(10, 255, 255, 1));
    let started = Instant::now();
    let outcome = TcpConnectProber
        .probe(target, 81, Duration::from_millis(100))
        .await;
    assert_eq!(outcome, ProbeOutcome::Closed(81));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn port_beyond_u32_is_closed() {
    let outcome = TcpConnectProber
        .probe(LOCALHOST, 4_294_967_296, Duration::from_millis(100))
        .await;
    assert_eq!(outcome, ProbeOutcome::Closed(4_294_967_296));
}
