use url::Url;

use crate::error::ScanError;
use crate::models::{ProbeResponse, Target, Verdict};

pub struct RedirectClassifier;

impl RedirectClassifier {
    /// Judges a single response. Only the hostname of the redirect target is
    /// looked at; scheme, port and path never change the outcome.
    pub fn classify(target: &Target, probe_url: &str, response: &ProbeResponse) -> Verdict {
        if !response.is_redirect() {
            return Verdict::NoRedirect {
                status: response.status,
            };
        }

        let location = match response.location.as_deref() {
            Some(l) if !l.trim().is_empty() => l.trim(),
            _ => {
                return Verdict::NoRedirect {
                    status: response.status,
                };
            }
        };

        let resolved = match Self::resolve(probe_url, location) {
            Ok(url) => url,
            Err(source) => {
                let err = ScanError::Location {
                    location: location.to_string(),
                    source,
                };
                return Verdict::Failed {
                    reason: err.to_string(),
                };
            }
        };

        match resolved.host_str() {
            Some(host) if Self::same_host(host, &target.host) => Verdict::SameHost {
                location: location.to_string(),
            },
            Some(_) => Verdict::Vulnerable {
                location: location.to_string(),
            },
            None => Verdict::Failed {
                reason: format!("redirect target '{}' has no host", location),
            },
        }
    }

    /// `example.com.` and `example.com` name the same host.
    fn same_host(a: &str, b: &str) -> bool {
        let a = a.strip_suffix('.').unwrap_or(a);
        let b = b.strip_suffix('.').unwrap_or(b);
        a.eq_ignore_ascii_case(b)
    }

    fn resolve(probe_url: &str, location: &str) -> Result<Url, url::ParseError> {
        match Url::parse(location) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(probe_url)?.join(location),
            Err(e) => Err(e),
        }
    }
}
