use std::fs::File;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use time::{format_description::well_known, OffsetDateTime};
use tokio_util::sync::CancellationToken;

use tcp_sweep::probe::TcpConnectProber;
use tcp_sweep::report::ConsoleReporter;
use tcp_sweep::scanner::Scanner;
use tcp_sweep::types::{ScanRequest, ScanResult};
use tcp_sweep::{logger, ports, resolver};

/// tcp-sweep — bounded-concurrency TCP connect port scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tcp-sweep",
    version,
    about = "Bounded-concurrency TCP connect port scanner.",
    long_about = None
)]
struct Cli {
    /// Target hostname or IP address.
    #[arg(short, long)]
    target: String,

    /// Ports to scan, e.g. `80,443` or `1-1000`.
    #[arg(short, long, default_value = "1-1024")]
    ports: String,

    /// Max concurrent TCP connect attempts.
    #[arg(short = 'n', long, default_value_t = 100)]
    threads: usize,

    /// Socket connect timeout in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    timeout_ms: u64,

    /// Print a line for every closed port.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Print diagnostic information to stderr.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Write results as pretty JSON to this path (optional).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    target: &'a str,
    address: IpAddr,
    finished_at: String,
    #[serde(flatten)]
    result: ScanResult,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        logger::init();
    }

    let address = resolver::resolve(&cli.target).await?;
    let port_list = ports::parse_ports(&cli.ports)?;
    let request = ScanRequest::new(
        address,
        port_list,
        cli.threads,
        Duration::from_millis(cli.timeout_ms),
    )?;

    println!("Target      : {} ({})", cli.target, address);
    println!("Ports       : {}", request.ports().len());
    println!("Threads     : {}", request.capacity());
    println!("------------------------");

    // Ctrl-C cancels the scan; probes already connecting finish on their own.
    let cancel = CancellationToken::new();
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_ctrlc.cancel();
        }
    });

    let result = Scanner::new(TcpConnectProber)
        .with_reporter(ConsoleReporter::new(cli.verbose))
        .scan_with_cancel(&request, cancel.clone())
        .await;

    println!("------------------------");
    if cancel.is_cancelled() {
        println!(
            "Scan interrupted after {} of {} ports",
            result.dispatched, result.requested
        );
    }
    println!("Found {} open port(s)", result.open_ports.len());

    if let Some(path) = cli.output.as_deref() {
        let report = ScanReport {
            target: &cli.target,
            address,
            finished_at: now_rfc3339(),
            result: ScanResult {
                open_ports: result.sorted_open_ports(),
                ..result
            },
        };
        write_report_json(path, &report)?;
        println!("Wrote JSON results to {}", path.display());
    }

    Ok(())
}

fn write_report_json(path: &Path, report: &ScanReport<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
