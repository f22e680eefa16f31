use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ScanError};

/// A URL under test. `base` keeps the caller's text (minus trailing slashes) so
/// payloads are appended verbatim; `host` is what redirects are compared against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub base: String,
    pub host: String,
}

impl Target {
    pub fn parse(input: &str) -> Result<Self> {
        let base = input.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base).map_err(|e| ScanError::InvalidTarget {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ScanError::InvalidTarget {
                input: input.to_string(),
                reason: "URL has no host".to_string(),
            })?
            .to_ascii_lowercase();

        Ok(Self { base, host })
    }

    pub fn probe<'a>(&'a self, payload: &'a str) -> Probe<'a> {
        Probe {
            target: self,
            payload,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
    pub target: &'a Target,
    pub payload: &'a str,
}

impl Probe<'_> {
    /// Plain concatenation, no separator and no encoding.
    pub fn url(&self) -> String {
        format!("{}{}", self.target.base, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_removed() {
        let target = Target::parse("https://example.com/login//").unwrap();
        assert_eq!(target.base, "https://example.com/login");
        assert_eq!(target.host, "example.com");
    }

    #[test]
    fn test_host_lowercased() {
        let target = Target::parse("  https://Example.COM/ ").unwrap();
        assert_eq!(target.host, "example.com");
        assert_eq!(target.base, "https://Example.COM");
    }

    #[test]
    fn test_probe_concatenates_without_separator() {
        let target = Target::parse("https://example.com/").unwrap();
        assert_eq!(target.probe("//evil.com").url(), "https://example.com//evil.com");
        assert_eq!(target.probe("?next=x").url(), "https://example.com?next=x");
        assert_eq!(target.probe("").url(), "https://example.com");
    }

    #[test]
    fn test_relative_input_rejected() {
        let result = Target::parse("/just/a/path");
        assert!(matches!(result, Err(ScanError::InvalidTarget { .. })));
    }

    #[test]
    fn test_hostless_input_rejected() {
        assert!(Target::parse("mailto:someone@example.com").is_err());
    }
}
