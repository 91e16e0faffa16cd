use std::sync::Arc;

/// Receives per-port progress while a scan runs.
///
/// `open` is called from the single collector task, `closed` from probe
/// tasks. Both default to doing nothing.
pub trait Reporter: Send + Sync + 'static {
    fn open(&self, _port: u64) {}

    fn closed(&self, _port: u64) {}
}

impl<R: Reporter> Reporter for Arc<R> {
    fn open(&self, port: u64) {
        (**self).open(port);
    }

    fn closed(&self, port: u64) {
        (**self).closed(port);
    }
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Reporter for Silent {}

/// Prints progress lines to stdout. Closed ports only when `verbose`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn open(&self, port: u64) {
        println!("[+] Port {port} open");
    }

    fn closed(&self, port: u64) {
        if self.verbose {
            println!("[.] Port {port} closed");
        }
    }
}
