//! Library crate for tcp-sweep exposing reusable modules.
pub mod error;
pub mod logger;
pub mod ports;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod types;
