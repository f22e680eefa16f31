use reqwest::{Client, header::LOCATION, redirect::Policy};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::models::ProbeResponse;

use super::Prober;

pub const DEFAULT_USER_AGENT: &str = concat!("redirscan/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // The first response is the one being judged, so redirects are never followed.
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    pub async fn get(&self, url: &str) -> Result<ProbeResponse> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        debug!(url, status, location = location.as_deref(), "probe answered");

        Ok(ProbeResponse::new(status, location))
    }
}

impl Prober for HttpClient {
    fn probe(&self, url: &str) -> impl Future<Output = Result<ProbeResponse>> + Send {
        self.get(url)
    }
}
