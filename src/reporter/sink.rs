use indicatif::ProgressBar;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use crate::error::Result;
use crate::models::{ProbeResult, ScanReport, ScanSummary};

/// Receives results one at a time from the writer task. Sinks are only ever
/// touched by that one task, so they need no locking of their own.
pub trait ResultSink: Send {
    fn name(&self) -> &'static str;

    fn record(&mut self, result: &ProbeResult) -> Result<()>;

    fn finish(&mut self, _summary: &ScanSummary) -> Result<()> {
        Ok(())
    }
}

/// Keeps every result in memory. The handle can be cloned before the sink is
/// moved into the writer and read back after the scan.
#[derive(Clone, Default)]
pub struct MemorySink {
    results: Arc<Mutex<Vec<ProbeResult>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<ProbeResult> {
        self.results
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl ResultSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn record(&mut self, result: &ProbeResult) -> Result<()> {
        if let Ok(mut results) = self.results.lock() {
            results.push(result.clone());
        }
        Ok(())
    }
}

/// Fans each result out to every sink and keeps the running tally.
pub struct ResultWriter {
    sinks: Vec<Box<dyn ResultSink>>,
    progress: ProgressBar,
    summary: ScanSummary,
    findings: Vec<ProbeResult>,
}

impl ResultWriter {
    pub fn new(progress: ProgressBar) -> Self {
        Self {
            sinks: Vec::new(),
            progress,
            summary: ScanSummary::default(),
            findings: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn set_total(&self, total: u64) {
        self.progress.set_length(total);
    }

    /// A sink that fails is dropped; the remaining sinks keep receiving results.
    pub fn record(&mut self, result: ProbeResult) {
        self.summary.record(&result);

        self.sinks.retain_mut(|sink| match sink.record(&result) {
            Ok(()) => true,
            Err(e) => {
                error!(sink = sink.name(), error = %e, "sink failed, disabling it");
                false
            }
        });

        if result.is_vulnerable() {
            self.findings.push(result);
        }

        self.progress.inc(1);
    }

    pub fn finish(mut self, duration_ms: u64) -> ScanReport {
        self.summary.duration_ms = duration_ms;

        for sink in &mut self.sinks {
            if let Err(e) = sink.finish(&self.summary) {
                error!(sink = sink.name(), error = %e, "sink failed to finish");
            } else {
                debug!(sink = sink.name(), "sink finished");
            }
        }

        self.progress.finish_and_clear();

        ScanReport {
            summary: self.summary,
            findings: self.findings,
        }
    }
}
