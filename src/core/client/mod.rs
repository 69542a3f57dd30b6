//! Public client surface + builder.
//! Defaults live in `constants` (UA, endpoints, batch size).

mod constants;

use crate::core::{IexError, net};
use constants::{DEFAULT_BASE_BATCH, DEFAULT_BASE_REF_DATA, DEFAULT_BATCH_SIZE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Handle to the IEX API.
///
/// Cheap to clone; every fetch builder takes a reference and clones what it needs.
#[derive(Debug, Clone)]
pub struct IexClient {
    http: Client,
    base_batch: Url,
    base_ref_data: Url,
    batch_size: usize,
}

impl Default for IexClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl IexClient {
    /// Create a new builder.
    pub fn builder() -> IexClientBuilder {
        IexClientBuilder::default()
    }

    /// Number of symbols sent per batch request unless a fetch overrides it.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn base_batch(&self) -> &Url {
        &self.base_batch
    }
    pub(crate) fn base_ref_data(&self) -> &Url {
        &self.base_ref_data
    }

    /// Issue one GET and parse the body as JSON.
    ///
    /// `endpoint` and `label` only name the fixture written in record mode.
    pub(crate) async fn get_json(
        &self,
        url: Url,
        endpoint: &str,
        label: &str,
    ) -> Result<serde_json::Value, IexError> {
        let resp = self
            .http
            .get(url.clone())
            .header("accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), url = %url, "request unsuccessful");
            return Err(IexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = net::get_text(resp, endpoint, label, "json").await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct IexClientBuilder {
    user_agent: Option<String>,
    base_batch: Option<Url>,
    base_ref_data: Option<Url>,
    batch_size: Option<usize>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl IexClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the batch endpoint (e.g., `https://api.iextrading.com/1.0/stock/market/batch`).
    pub fn base_batch(mut self, url: Url) -> Self {
        self.base_batch = Some(url);
        self
    }

    /// Override the reference-data symbols endpoint.
    pub fn base_ref_data(mut self, url: Url) -> Self {
        self.base_ref_data = Some(url);
        self
    }

    /// Maximum number of symbols per batch request. Default: 100.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<IexClient, IexError> {
        let base_batch = match self.base_batch {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_BATCH)?,
        };
        let base_ref_data = match self.base_ref_data {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_REF_DATA)?,
        };

        let batch_size = self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(IexError::InvalidParams("batch_size must be at least 1".into()));
        }

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(IexClient {
            http,
            base_batch,
            base_ref_data,
            batch_size,
        })
    }
}
