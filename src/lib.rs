pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod logging;
pub mod models;
pub mod reporter;
pub mod scanner;

pub use analyzer::RedirectClassifier;
pub use config::ScanConfig;
pub use error::ScanError;
pub use http::{ClientConfig, HttpClient, Prober};
pub use models::{ProbeResponse, ProbeResult, ScanReport, ScanSummary, Target, Verdict};
pub use reporter::{ConsoleReporter, ConsoleSink, FileSink, JsonSink, MemorySink, ResultSink, ResultWriter};
pub use scanner::{Scanner, run_scan};
