use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::models::Target;

/// A list file takes precedence over a single URL.
pub fn load_targets(list_file: Option<&Path>, single: Option<&str>) -> Result<Vec<Target>> {
    match (list_file, single) {
        (Some(path), _) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read URL list {}", path.display()))?;
            parse_targets(&content)
        }
        (None, Some(url)) => parse_targets(url),
        (None, None) => bail!("Provide either a URL list file (-l) or a single URL (-u)"),
    }
}

pub fn load_payloads(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload file {}", path.display()))?;
    parse_payloads(&content)
}

pub fn parse_targets(input: &str) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match Target::parse(trimmed) {
            Ok(target) => targets.push(target),
            Err(e) => warn!(error = %e, "skipping target"),
        }
    }

    if targets.is_empty() {
        bail!("No valid target URLs found");
    }

    Ok(targets)
}

pub fn parse_payloads(input: &str) -> Result<Vec<String>> {
    let payloads: Vec<String> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if payloads.is_empty() {
        bail!("Payload file contains no payloads");
    }

    Ok(payloads)
}
