mod result;
mod target;

pub use result::{ProbeResponse, ProbeResult, ScanReport, ScanSummary, Verdict};
pub use target::{Probe, Target};
