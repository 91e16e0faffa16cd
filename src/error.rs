use thiserror::Error;

/// A malformed port specification string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortSpecError {
    #[error("invalid port range: `{0}`")]
    InvalidRangeFormat(String),
    #[error("invalid port number: `{0}`")]
    InvalidPortNumber(String),
}

/// Errors detected before the scan engine is started.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid port specification: {0}")]
    InvalidPortSpec(#[from] PortSpecError),
    #[error("failed to resolve target `{target}`")]
    UnresolvableTarget {
        target: String,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error("pool capacity must be at least 1")]
    InvalidPoolCapacity,
    #[error("per-attempt timeout must be greater than zero")]
    ZeroTimeout,
}

/// Why a probe produced no classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("scan cancelled before the probe started")]
    Cancelled,
}
