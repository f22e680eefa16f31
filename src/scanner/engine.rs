use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::analyzer::RedirectClassifier;
use crate::error::{Result, ScanError};
use crate::http::Prober;
use crate::models::{ProbeResult, ScanReport, Target, Verdict};
use crate::reporter::ResultWriter;

/// Fans probes out over every target × payload pair with at most
/// `concurrency` requests in flight. Workers only produce results; the
/// writer task is the sole consumer and the only thing touching output.
pub struct Scanner<P: Prober> {
    prober: Arc<P>,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl<P: Prober> Scanner<P> {
    pub fn new(prober: P, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(ScanError::InvalidConcurrency(concurrency));
        }

        Ok(Self {
            prober: Arc::new(prober),
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    pub async fn run(
        &self,
        targets: &[Target],
        payloads: &[String],
        mut writer: ResultWriter,
    ) -> Result<ScanReport> {
        let start = Instant::now();
        let total = targets.len() * payloads.len();

        info!(
            targets = targets.len(),
            payloads = payloads.len(),
            total,
            concurrency = self.concurrency,
            "starting scan"
        );
        writer.set_total(total as u64);

        let (tx, mut rx) = mpsc::channel::<ProbeResult>(self.concurrency);

        let writer_task = tokio::spawn(async move {
            while let Some(result) = rx.recv().await {
                writer.record(result);
            }
            writer
        });

        let mut workers = JoinSet::new();

        for target in targets {
            let target = Arc::new(target.clone());

            for payload in payloads {
                let url = target.probe(payload).url();

                // Blocks the producer once `concurrency` probes are outstanding.
                let permit = Arc::clone(&self.semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|_| ScanError::SemaphoreClosed)?;

                let prober = Arc::clone(&self.prober);
                let target = Arc::clone(&target);
                let tx = tx.clone();

                workers.spawn(async move {
                    let result = probe_one(prober.as_ref(), &target, url).await;
                    if tx.send(result).await.is_err() {
                        warn!("result writer closed before probe finished");
                    }
                    drop(permit);
                });

                while let Some(joined) = workers.try_join_next() {
                    log_join(joined);
                }
            }
        }

        while let Some(joined) = workers.join_next().await {
            log_join(joined);
        }

        // Last sender goes away here, which lets the writer loop end.
        drop(tx);

        let writer = writer_task.await.map_err(|e| {
            error!(error = %e, "result writer task failed");
            ScanError::WriterGone
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let report = writer.finish(duration_ms);

        info!(
            total = report.summary.total,
            vulnerable = report.summary.vulnerable,
            duration_ms,
            "scan complete"
        );

        Ok(report)
    }
}

pub fn create_progress_bar(show: bool, verbose: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    let template = if verbose {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {per_sec}"
    } else {
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}"
    };

    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    pb
}

async fn probe_one<P: Prober>(prober: &P, target: &Target, url: String) -> ProbeResult {
    let start = Instant::now();

    let (status, verdict) = match prober.probe(&url).await {
        Ok(response) => {
            let verdict = RedirectClassifier::classify(target, &url, &response);
            (Some(response.status), verdict)
        }
        Err(e) => {
            debug!(url = %url, error = %e, "probe failed");
            (
                None,
                Verdict::Failed {
                    reason: e.to_string(),
                },
            )
        }
    };

    ProbeResult {
        url,
        target_host: target.host.clone(),
        status,
        verdict,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

fn log_join(joined: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "probe worker panicked");
    }
}
