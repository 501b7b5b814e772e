use std::time::Duration;

use tracing::{debug, instrument};

use crate::error::{LapseError, Result};
use crate::validation::normalize_domain;

/// PKNIC registry lookup form. Takes a POSTed `name` field and returns
/// an HTML page with the registration record as a table.
const DEFAULT_LOOKUP_URL: &str = "https://pk6.pknic.net.pk/pk5/lookup.PK";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for fetching a domain's registration page from the registrar.
#[derive(Debug, Clone)]
pub struct RegistrarClient {
    url: String,
    timeout: Duration,
}

impl Default for RegistrarClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrarClient {
    /// Create a new RegistrarClient pointed at the PKNIC lookup page.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_LOOKUP_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the lookup URL (e.g. a registry mirror or a test server).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the timeout for the lookup request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the registration page for a domain and return the raw HTML.
    #[instrument(skip(self), fields(domain = %domain))]
    pub async fn fetch(&self, domain: &str) -> Result<String> {
        let domain = normalize_domain(domain)?;
        debug!(url = %self.url, "Querying registrar lookup page");

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        let response = client
            .post(&self.url)
            .header("User-Agent", "lapse/0.1.0")
            .form(&[("name", domain.as_str())])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LapseError::LookupError(format!(
                "Registrar returned HTTP {} for {}",
                status.as_u16(),
                domain
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        debug!(bytes = body.len(), "Received registrar response");
        Ok(body)
    }

    /// Timeouts get their own variant whether they hit during the send
    /// or while reading the body.
    fn map_transport_error(&self, e: reqwest::Error) -> LapseError {
        if e.is_timeout() {
            LapseError::Timeout(format!("Lookup request to {} timed out", self.url))
        } else {
            LapseError::HttpError(e)
        }
    }
}
