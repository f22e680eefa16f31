mod client;

use std::future::Future;

use crate::error::Result;
use crate::models::ProbeResponse;

pub use client::{ClientConfig, DEFAULT_USER_AGENT, HttpClient};

/// Issues one request for a fully built probe URL and reports the first response.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, url: &str) -> impl Future<Output = Result<ProbeResponse>> + Send;
}
