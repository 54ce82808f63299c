//! EdgeGrid (EG1-HMAC-SHA256) request signing.
//!
//! Each request carries an `Authorization` header derived from the client
//! credentials, a UTC timestamp, and a one-time nonce:
//!
//! ```text
//! EG1-HMAC-SHA256 client_token=..;access_token=..;timestamp=..;nonce=..;signature=..
//! ```
//!
//! The signature is an HMAC over the tab-joined request line (method,
//! scheme, host, path+query), an empty canonical header block, the body
//! hash, and the header prefix itself. The HMAC key is in turn an HMAC of
//! the timestamp under the client secret.

use crate::edgerc::Credentials;
use crate::error::{AaError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Algorithm identifier that opens every Authorization header
pub const ALGORITHM: &str = "EG1-HMAC-SHA256";

/// Timestamp layout expected by the EdgeGrid service
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%S+0000";

/// Current UTC time in EdgeGrid layout
pub fn timestamp_now() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Fresh request nonce
pub fn new_nonce() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Request components that enter the signature
#[derive(Debug, Clone, Copy)]
pub struct SignableRequest<'a> {
    pub method: &'a str,
    /// The exact URL the request is sent to
    pub url: &'a Url,
    pub body: &'a [u8],
}

/// Signs requests for one credential set
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Authorization header value for `request`, using the current time
    /// and a new nonce.
    pub fn sign(&self, request: &SignableRequest<'_>) -> Result<String> {
        self.sign_with(request, &timestamp_now(), &new_nonce())
    }

    /// Authorization header value for `request` with a fixed timestamp
    /// and nonce.
    pub fn sign_with(
        &self,
        request: &SignableRequest<'_>,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String> {
        let prefix = format!(
            "{} client_token={};access_token={};timestamp={};nonce={};",
            ALGORITHM, self.credentials.client_token, self.credentials.access_token, timestamp, nonce
        );

        let signing_key = self.signing_key(timestamp)?;
        let data = self.data_to_sign(request, &prefix)?;
        let signature = hmac_base64(signing_key.as_bytes(), data.as_bytes())?;

        Ok(format!("{}signature={}", prefix, signature))
    }

    /// Per-timestamp HMAC key derived from the client secret
    pub fn signing_key(&self, timestamp: &str) -> Result<String> {
        hmac_base64(
            self.credentials.client_secret.as_bytes(),
            timestamp.as_bytes(),
        )
    }

    /// Base64 SHA-256 of the body prefix, only for POST requests
    pub fn content_hash(&self, request: &SignableRequest<'_>) -> String {
        if !request.method.eq_ignore_ascii_case("POST") || request.body.is_empty() {
            return String::new();
        }
        let end = request.body.len().min(self.credentials.max_body);
        STANDARD.encode(Sha256::digest(&request.body[..end]))
    }

    /// Tab-joined string covered by the signature
    pub fn data_to_sign(&self, request: &SignableRequest<'_>, prefix: &str) -> Result<String> {
        let url = request.url;
        let host = url
            .host_str()
            .ok_or_else(|| AaError::InvalidHost(url.to_string()))?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let method = request.method.to_uppercase();
        let content_hash = self.content_hash(request);

        let fields: [&str; 7] = [
            &method,
            url.scheme(),
            &authority,
            &path_and_query,
            "",
            &content_hash,
            prefix,
        ];
        Ok(fields.join("\t"))
    }
}

fn hmac_base64(key: &[u8], message: &[u8]) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| AaError::Signing(e.to_string()))?;
    mac.update(message);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
