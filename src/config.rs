use std::path::PathBuf;

use crate::http::ClientConfig;

/// Everything a scan run needs, independent of how it was collected.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub list: Option<PathBuf>,
    pub url: Option<String>,
    pub payloads: PathBuf,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub concurrency: usize,
    pub verbose: bool,
    pub progress: bool,
    pub client: ClientConfig,
}

impl ScanConfig {
    pub fn new(payloads: impl Into<PathBuf>) -> Self {
        Self {
            list: None,
            url: None,
            payloads: payloads.into(),
            output: None,
            json: None,
            concurrency: 1,
            verbose: false,
            progress: false,
            client: ClientConfig::default(),
        }
    }
}
