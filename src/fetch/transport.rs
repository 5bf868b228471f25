use std::time::Duration;

use crate::error::FetchError;

/// Blocking text retrieval from the source server.
///
/// The trait is the seam that lets tests script responses without a network.
pub(crate) trait Transport {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

pub(crate) struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// `timeout` bounds a single attempt; the retry loop owns the overall budget.
    pub(crate) fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let mut response = self.agent.get(url).call().map_err(|e| FetchError::Transfer {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Transfer {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}
