use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: u16,
    pub location: Option<String>,
}

impl ProbeResponse {
    pub fn new(status: u16, location: Option<String>) -> Self {
        Self { status, location }
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Vulnerable { location: String },
    SameHost { location: String },
    NoRedirect { status: u16 },
    Failed { reason: String },
}

impl Verdict {
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, Verdict::Vulnerable { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Vulnerable { location } => write!(f, "VULNERABLE (Redirected to {})", location),
            Verdict::SameHost { location } => write!(f, "Not vulnerable (Redirected to {})", location),
            Verdict::NoRedirect { .. } => write!(f, "Not vulnerable"),
            Verdict::Failed { reason } => write!(f, "Error: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    pub target_host: String,
    pub status: Option<u16>,
    pub verdict: Verdict,
    pub duration_ms: u64,
}

impl ProbeResult {
    pub fn is_vulnerable(&self) -> bool {
        self.verdict.is_vulnerable()
    }

    /// `"{url} -> {verdict}"` without any color codes.
    pub fn line(&self) -> String {
        format!("{} -> {}", self.url, self.verdict)
    }

    pub fn location(&self) -> Option<&str> {
        match &self.verdict {
            Verdict::Vulnerable { location } | Verdict::SameHost { location } => Some(location),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    pub vulnerable: usize,
    pub same_host: usize,
    pub no_redirect: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

impl ScanSummary {
    pub fn record(&mut self, result: &ProbeResult) {
        self.total += 1;
        match result.verdict {
            Verdict::Vulnerable { .. } => self.vulnerable += 1,
            Verdict::SameHost { .. } => self.same_host += 1,
            Verdict::NoRedirect { .. } => self.no_redirect += 1,
            Verdict::Failed { .. } => self.failed += 1,
        }
    }

    pub fn from_results(results: &[ProbeResult], duration_ms: u64) -> Self {
        let mut summary = Self {
            duration_ms,
            ..Self::default()
        };
        for result in results {
            summary.record(result);
        }
        summary
    }
}

/// What a finished scan hands back: the counters plus every VULNERABLE result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub findings: Vec<ProbeResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(verdict: Verdict) -> ProbeResult {
        ProbeResult {
            url: "https://example.com//evil.com".to_string(),
            target_host: "example.com".to_string(),
            status: Some(302),
            verdict,
            duration_ms: 12,
        }
    }

    #[test]
    fn test_line_format() {
        let vuln = result(Verdict::Vulnerable {
            location: "https://evil.com".to_string(),
        });
        assert_eq!(
            vuln.line(),
            "https://example.com//evil.com -> VULNERABLE (Redirected to https://evil.com)"
        );

        let quiet = result(Verdict::NoRedirect { status: 200 });
        assert_eq!(quiet.line(), "https://example.com//evil.com -> Not vulnerable");

        let failed = result(Verdict::Failed {
            reason: "timed out".to_string(),
        });
        assert_eq!(failed.line(), "https://example.com//evil.com -> Error: timed out");
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result(Verdict::Vulnerable { location: "https://evil.com".into() }),
            result(Verdict::Vulnerable { location: "https://evil.org".into() }),
            result(Verdict::SameHost { location: "/home".into() }),
            result(Verdict::NoRedirect { status: 404 }),
            result(Verdict::Failed { reason: "reset".into() }),
        ];

        let summary = ScanSummary::from_results(&results, 900);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.vulnerable, 2);
        assert_eq!(summary.same_host, 1);
        assert_eq!(summary.no_redirect, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.duration_ms, 900);
    }

    #[test]
    fn test_redirect_range() {
        assert!(ProbeResponse::new(301, None).is_redirect());
        assert!(ProbeResponse::new(399, None).is_redirect());
        assert!(!ProbeResponse::new(400, None).is_redirect());
        assert!(!ProbeResponse::new(200, None).is_redirect());
    }
}
