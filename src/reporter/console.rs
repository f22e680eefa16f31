use colored::Colorize;
use indicatif::ProgressBar;
use std::io::{self, Stdout, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::sink::ResultSink;
use crate::error::Result;
use crate::models::{ProbeResult, ScanSummary, Verdict};

/// Prints result lines to stdout. VULNERABLE hits and errors always show;
/// everything else only in verbose mode. The progress bar lives on stderr
/// and is suspended around each write.
pub struct ConsoleSink<W = Stdout> {
    verbose: bool,
    progress: ProgressBar,
    out: W,
}

impl ConsoleSink {
    pub fn new(verbose: bool, progress: ProgressBar) -> Self {
        ConsoleSink::with_writer(verbose, progress, io::stdout())
    }

    pub fn render(result: &ProbeResult, verbose: bool) -> Option<String> {
        match &result.verdict {
            Verdict::Vulnerable { location } => Some(format!(
                "{} -> {} (Redirected to {})",
                result.url,
                "VULNERABLE".red(),
                location
            )),
            Verdict::Failed { reason } => Some(format!("{} -> Error: {}", result.url, reason)),
            Verdict::SameHost { location } if verbose => Some(format!(
                "{} -> Not vulnerable (Redirected to {})",
                result.url, location
            )),
            Verdict::NoRedirect { .. } if verbose => {
                Some(format!("{} -> Not vulnerable", result.url))
            }
            _ => None,
        }
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn with_writer(verbose: bool, progress: ProgressBar, out: W) -> Self {
        Self {
            verbose,
            progress,
            out,
        }
    }
}

impl<W: Write + Send> ResultSink for ConsoleSink<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    /// Write errors (a closed pipe) surface here so the writer can drop the sink.
    fn record(&mut self, result: &ProbeResult) -> Result<()> {
        if let Some(line) = ConsoleSink::<Stdout>::render(result, self.verbose) {
            let out = &mut self.out;
            self.progress
                .suspend(|| writeln!(out, "{}", line).and_then(|_| out.flush()))?;
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Probe URL")]
    url: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Redirected To")]
    location: String,
}

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_findings(&self, findings: &[ProbeResult]) {
        if findings.is_empty() {
            println!("\n{}", "No open redirects found.".green());
            return;
        }

        let rows: Vec<FindingRow> = findings
            .iter()
            .map(|f| FindingRow {
                url: f.url.clone(),
                status: f
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                location: f.location().unwrap_or("-").to_string(),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("\n{}", "Open Redirects".red().bold());
        println!("{}", table);
    }

    pub fn print_summary(&self, summary: &ScanSummary) {
        println!("\n{}", "Summary".bold().underline());
        println!(
            "{} probes sent in {:.2}s",
            summary.total,
            summary.duration_ms as f64 / 1000.0
        );

        if summary.vulnerable > 0 {
            println!("  {}: {}", "VULNERABLE".red().bold(), summary.vulnerable);
        }
        println!("  {}: {}", "Same-host redirect".cyan(), summary.same_host);
        println!("  {}: {}", "No redirect".green(), summary.no_redirect);
        if summary.failed > 0 {
            println!("  {}: {}", "Errors".yellow(), summary.failed);
        }
        println!();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{MemorySink, ResultWriter};
    use std::sync::{Arc, Mutex};

    fn result(verdict: Verdict) -> ProbeResult {
        ProbeResult {
            url: "https://example.com/r?u=//evil.com".to_string(),
            target_host: "example.com".to_string(),
            status: Some(302),
            verdict,
            duration_ms: 3,
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_lines_go_to_writer_while_bar_is_active() {
        colored::control::set_override(false);
        let buf = SharedBuf::default();
        let bar = ProgressBar::new(3);
        let mut sink = ConsoleSink::with_writer(false, bar.clone(), buf.clone());

        sink.record(&result(Verdict::Vulnerable {
            location: "//evil.com".to_string(),
        }))
        .unwrap();
        sink.record(&result(Verdict::NoRedirect { status: 200 })).unwrap();
        bar.finish_and_clear();

        assert_eq!(
            buf.contents(),
            "https://example.com/r?u=//evil.com -> VULNERABLE (Redirected to //evil.com)\n"
        );
    }

    #[test]
    fn test_closed_stdout_disables_console_only() {
        let memory = MemorySink::new();
        let mut writer = ResultWriter::new(ProgressBar::hidden())
            .with_sink(ConsoleSink::with_writer(true, ProgressBar::hidden(), ClosedPipe))
            .with_sink(memory.clone());

        let mut sink = ConsoleSink::with_writer(true, ProgressBar::hidden(), ClosedPipe);
        assert!(sink.record(&result(Verdict::NoRedirect { status: 200 })).is_err());

        writer.record(result(Verdict::NoRedirect { status: 200 }));
        writer.record(result(Verdict::NoRedirect { status: 404 }));
        let report = writer.finish(0);

        assert_eq!(report.summary.total, 2);
        assert_eq!(memory.results().len(), 2);
    }

    #[test]
    fn test_vulnerable_always_rendered() {
        let r = result(Verdict::Vulnerable {
            location: "//evil.com".to_string(),
        });
        let line = ConsoleSink::render(&r, false).unwrap();
        assert!(line.contains("VULNERABLE"));
        assert!(line.contains("(Redirected to //evil.com)"));
    }

    #[test]
    fn test_errors_always_rendered() {
        let r = result(Verdict::Failed {
            reason: "connection refused".to_string(),
        });
        assert_eq!(
            ConsoleSink::render(&r, false).unwrap(),
            "https://example.com/r?u=//evil.com -> Error: connection refused"
        );
    }

    #[test]
    fn test_quiet_results_need_verbose() {
        let same = result(Verdict::SameHost {
            location: "/home".to_string(),
        });
        let none = result(Verdict::NoRedirect { status: 200 });

        assert!(ConsoleSink::render(&same, false).is_none());
        assert!(ConsoleSink::render(&none, false).is_none());
        assert_eq!(
            ConsoleSink::render(&same, true).unwrap(),
            "https://example.com/r?u=//evil.com -> Not vulnerable (Redirected to /home)"
        );
        assert_eq!(
            ConsoleSink::render(&none, true).unwrap(),
            "https://example.com/r?u=//evil.com -> Not vulnerable"
        );
    }
}
