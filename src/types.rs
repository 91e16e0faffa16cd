use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, ScanError};

/// Everything the engine needs for one scan. Validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    target: IpAddr,
    ports: Vec<u64>,
    capacity: usize,
    timeout: Duration,
}

impl ScanRequest {
    pub fn new(
        target: IpAddr,
        ports: Vec<u64>,
        capacity: usize,
        timeout: Duration,
    ) -> Result<Self, ScanError> {
        if capacity == 0 {
            return Err(ScanError::InvalidPoolCapacity);
        }
        if timeout.is_zero() {
            return Err(ScanError::ZeroTimeout);
        }
        Ok(Self {
            target,
            ports,
            capacity,
            timeout,
        })
    }

    pub fn target(&self) -> IpAddr {
        self.target
    }

    pub fn ports(&self) -> &[u64] {
        &self.ports
    }

    /// Maximum number of probes in flight at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Classification of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Open(u64),
    Closed(u64),
    Errored(u64, ProbeError),
}

/// Outcome of a whole scan.
///
/// `open_ports` is in completion order; treat it as a set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub requested: u64,
    pub dispatched: u64,
    pub open_ports: Vec<u64>,
}

impl ScanResult {
    /// Open ports in ascending numeric order.
    pub fn sorted_open_ports(&self) -> Vec<u64> {
        let mut ports = self.open_ports.clone();
        ports.sort_unstable();
        ports
    }
}
