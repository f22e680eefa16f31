use anyhow::{Context, Result};
use tracing::info;

use super::engine::{Scanner, create_progress_bar};
use crate::config::ScanConfig;
use crate::http::HttpClient;
use crate::input;
use crate::models::ScanReport;
use crate::reporter::{ConsoleSink, FileSink, JsonSink, ResultWriter};

/// Loads inputs, wires up the sinks named in `config` and runs the scan.
pub async fn run_scan(config: &ScanConfig) -> Result<ScanReport> {
    let targets = input::load_targets(config.list.as_deref(), config.url.as_deref())?;
    let payloads = input::load_payloads(&config.payloads)?;

    info!(
        targets = targets.len(),
        payloads = payloads.len(),
        "inputs loaded"
    );

    let client = HttpClient::new(&config.client).context("Failed to create HTTP client")?;
    let scanner = Scanner::new(client, config.concurrency)?;

    let progress = create_progress_bar(config.progress, config.verbose);
    let mut writer = ResultWriter::new(progress.clone())
        .with_sink(ConsoleSink::new(config.verbose, progress));

    if let Some(path) = &config.output {
        let sink = FileSink::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        writer = writer.with_sink(sink);
    }

    if let Some(path) = &config.json {
        writer = writer.with_sink(JsonSink::new(path));
    }

    let report = scanner.run(&targets, &payloads, writer).await?;
    Ok(report)
}
