use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use redirscan::cli::Cli;
use redirscan::{ConsoleReporter, ScanConfig, logging, run_scan};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose);

    let config = ScanConfig::from(cli);

    println!(
        "{} {} thread(s)",
        "redirscan".cyan().bold(),
        config.concurrency
    );

    let report = run_scan(&config).await?;

    let reporter = ConsoleReporter::new();
    reporter.print_findings(&report.findings);
    reporter.print_summary(&report.summary);

    if let Some(path) = &config.output {
        println!("Results saved to {}", path.display().to_string().cyan());
    }
    if let Some(path) = &config.json {
        println!("JSON report saved to {}", path.display().to_string().cyan());
    }

    Ok(())
}
