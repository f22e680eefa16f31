use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::sink::ResultSink;
use crate::error::Result;
use crate::models::{ProbeResult, ScanSummary};

/// Plain-text list of VULNERABLE lines, one per hit, in arrival order.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Truncates any existing file so each run starts clean.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ResultSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn record(&mut self, result: &ProbeResult) -> Result<()> {
        if result.is_vulnerable() {
            writeln!(self.writer, "{}", result.line())?;
        }
        Ok(())
    }

    fn finish(&mut self, _summary: &ScanSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
pub struct ExportData {
    pub scan_time: String,
    pub summary: ScanSummary,
    pub results: Vec<ProbeResult>,
}

/// Buffers every result and writes a single JSON document once the scan ends.
pub struct JsonSink {
    path: PathBuf,
    results: Vec<ProbeResult>,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            results: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<ExportData> {
        use anyhow::Context;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let data = serde_json::from_str(&content)?;
        Ok(data)
    }
}

impl ResultSink for JsonSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn record(&mut self, result: &ProbeResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &ScanSummary) -> Result<()> {
        let output = ExportData {
            scan_time: Utc::now().to_rfc3339(),
            summary: summary.clone(),
            results: std::mem::take(&mut self.results),
        };

        let json = serde_json::to_string_pretty(&output)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
