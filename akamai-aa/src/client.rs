//! HTTP client for the Adaptive Acceleration reporting API.

use aa_core::api::{Endpoint, MeasuresQuery, Problem};
use aa_core::edgegrid::{SignableRequest, Signer};
use aa_core::edgerc::Credentials;
use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Client for the reporting API.
///
/// Every request is signed with EdgeGrid and sent exactly once; there is
/// no retry, caching, or response transformation. Successful responses
/// come back as the JSON document the server sent.
///
/// # Examples
///
/// ```no_run
/// use akamai_aa::client::AaClient;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = AaClient::from_edgerc(Path::new("/home/me/.edgerc"), "default", 30)?;
/// let usage = client.contract_usage("C-0N7RAC7").await?;
/// println!("{}", serde_json::to_string_pretty(&usage)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AaClient {
    client: Client,
    base_url: Url,
    signer: Signer,
}

impl AaClient {
    /// Create a client for an already resolved credential set.
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not form a valid URL or the HTTP
    /// client cannot be created.
    pub fn new(credentials: Credentials, timeout_secs: u64) -> Result<Self> {
        let base_url = credentials
            .base_url()
            .context("Failed to build API base URL")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("akamai-aa/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            signer: Signer::new(credentials),
        })
    }

    /// Create a client from an edgerc file section.
    ///
    /// `AKAMAI_*` environment credentials for the section take priority
    /// over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The edgerc file does not exist or cannot be parsed
    /// - The section is missing
    /// - A credential field is missing
    pub fn from_edgerc(edgerc: &Path, section: &str, timeout_secs: u64) -> Result<Self> {
        let credentials = Credentials::resolve(edgerc, section).with_context(|| {
            format!(
                "Failed to load credentials from {} [{}]",
                edgerc.display(),
                section
            )
        })?;

        Self::new(credentials, timeout_secs)
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List usage data matching the query.
    ///
    /// The server expects at least one contract or reporting group ID;
    /// the query is sent as given.
    pub async fn list_measures(&self, query: &MeasuresQuery) -> Result<Value> {
        let body = serde_json::to_vec(query).context("Failed to serialize measures query")?;
        self.send(Method::POST, &Endpoint::Measures, Some(body))
            .await
    }

    /// List a period of usage for a reporting group.
    pub async fn reporting_group_usage(&self, reporting_group_id: &str) -> Result<Value> {
        let endpoint = Endpoint::ReportingGroupUsage(reporting_group_id.to_string());
        self.send(Method::GET, &endpoint, None).await
    }

    /// List the reportable statistics for a reporting group.
    pub async fn reporting_group_statistics(&self, reporting_group_id: &str) -> Result<Value> {
        let endpoint = Endpoint::ReportingGroupStatistics(reporting_group_id.to_string());
        self.send(Method::GET, &endpoint, None).await
    }

    /// List a period of usage for an entire contract.
    pub async fn contract_usage(&self, contract_id: &str) -> Result<Value> {
        let endpoint = Endpoint::ContractUsage(contract_id.to_string());
        self.send(Method::GET, &endpoint, None).await
    }

    /// List the reportable statistics for a contract.
    pub async fn contract_statistics(&self, contract_id: &str) -> Result<Value> {
        let endpoint = Endpoint::ContractStatistics(contract_id.to_string());
        self.send(Method::GET, &endpoint, None).await
    }

    /// Sign and send one request, then decode the response.
    ///
    /// The URL that is signed is the URL that is sent.
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<Value> {
        let name = endpoint.name();
        let url = endpoint
            .url(&self.base_url)
            .with_context(|| format!("Failed to build request URL for {}", name))?;

        let authorization = self
            .signer
            .sign(&SignableRequest {
                method: method.as_str(),
                url: &url,
                body: body.as_deref().unwrap_or_default(),
            })
            .with_context(|| format!("Failed to sign request to {}", name))?;

        tracing::debug!(method = %method, url = %url, "sending request");

        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", name))?;

        tracing::debug!(status = %response.status(), endpoint = %name, "received response");

        Self::handle_response(response, &name).await
    }

    /// Turn an HTTP response into the returned JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read
    /// - The body is not JSON
    async fn handle_response(response: Response, endpoint: &str) -> Result<Value> {
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", endpoint))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<Problem>(&text)
                .ok()
                .and_then(|problem| problem.summary())
                .unwrap_or_else(|| text.trim().to_string());

            let error_msg = match status {
                StatusCode::NOT_FOUND => format!("Endpoint {} not found: {}", endpoint, detail),
                StatusCode::BAD_REQUEST => format!("Bad request to {}: {}", endpoint, detail),
                StatusCode::UNAUTHORIZED => format!("Unauthorized access to {}: {}", endpoint, detail),
                StatusCode::FORBIDDEN => format!("Access forbidden to {}: {}", endpoint, detail),
                StatusCode::INTERNAL_SERVER_ERROR => {
                    format!("Server error at {}: {}", endpoint, detail)
                }
                StatusCode::SERVICE_UNAVAILABLE => format!("Service unavailable at {}", endpoint),
                _ => format!("HTTP {} error at {}: {}", status, endpoint, detail),
            };
            return Err(anyhow::anyhow!(error_msg));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {}", endpoint))
    }
}
