use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::ScanConfig;
use crate::http::{ClientConfig, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(name = "redirscan")]
#[command(version, about = "Concurrent open-redirect vulnerability scanner")]
#[command(group(ArgGroup::new("source").required(true).args(["list", "url"])))]
pub struct Cli {
    /// File containing a list of URLs, one per line
    #[arg(short = 'l', long)]
    pub list: Option<PathBuf>,

    /// Single URL to test
    #[arg(short, long)]
    pub url: Option<String>,

    /// File containing payloads to append to every URL
    #[arg(short, long)]
    pub payloads: PathBuf,

    /// Write VULNERABLE results to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of concurrent requests
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,

    /// Also print results that are not vulnerable
    #[arg(short, long)]
    pub verbose: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Write every result as a JSON document to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    #[arg(long)]
    pub no_color: bool,

    #[arg(long)]
    pub no_progress: bool,
}

impl From<Cli> for ScanConfig {
    fn from(cli: Cli) -> Self {
        Self {
            list: cli.list,
            url: cli.url,
            payloads: cli.payloads,
            output: cli.output,
            json: cli.json,
            concurrency: cli.threads as usize,
            verbose: cli.verbose,
            progress: !cli.no_progress,
            client: ClientConfig {
                timeout_secs: cli.timeout,
                user_agent: cli.user_agent,
                accept_invalid_certs: cli.insecure,
            },
        }
    }
}
