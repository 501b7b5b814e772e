//! Probe orchestration: fetch the registrar page, extract the expiry
//! cell, and evaluate it against the query thresholds.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::expiry::{evaluate, Evaluation, ExpiryQuery};
use crate::registrar::{extract_expiry_date, RegistrarClient};

/// One-shot expiry probe for a single domain.
#[derive(Debug, Clone, Default)]
pub struct ExpiryProbe {
    client: RegistrarClient,
}

impl ExpiryProbe {
    pub fn new() -> Self {
        Self {
            client: RegistrarClient::new(),
        }
    }

    /// Use a preconfigured registrar client (custom URL or timeout).
    pub fn with_client(client: RegistrarClient) -> Self {
        Self { client }
    }

    /// Run the probe. `today` is injected so the evaluation itself stays
    /// deterministic; only the registrar fetch touches the network.
    ///
    /// `Ok(None)` means the domain is at or past its expiry date, the
    /// range the classifier produces no status for. Callers own the
    /// fallback policy for that case.
    #[instrument(skip(self), fields(domain = %query.domain))]
    pub async fn check(&self, query: &ExpiryQuery, today: NaiveDate) -> Result<Option<Evaluation>> {
        let html = self.client.fetch(&query.domain).await?;
        let raw = extract_expiry_date(&html, &query.domain)?;
        debug!(expiry = %raw, "Extracted expiry date from registrar page");

        evaluate(query, &raw, today)
    }
}
