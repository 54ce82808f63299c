//! EdgeGrid credential resolution
//!
//! Credentials come from an INI-style `.edgerc` file with one section per
//! credential set:
//!
//! ```ini
//! [default]
//! host = akab-xxxx.luna.akamaiapis.net
//! client_token = akab-client-token
//! client_secret = base64secret=
//! access_token = akab-access-token
//! max-body = 131072
//! ```
//!
//! A complete set of `AKAMAI_*` environment variables takes priority over
//! the file.

use crate::error::{AaError, Result};
use config::{Config, File, FileFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Section used when none is given
pub const DEFAULT_SECTION: &str = "default";

/// Largest request body hashed for signing unless the section overrides it
pub const DEFAULT_MAX_BODY: usize = 131_072;

/// Returns the default edgerc path: `~/.edgerc`.
pub fn default_edgerc_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".edgerc")
}

/// One resolved credential set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API host, e.g. `akab-xxxx.luna.akamaiapis.net`; may carry a scheme
    pub host: String,
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
    /// Largest request body prefix covered by the content hash
    pub max_body: usize,
}

impl Credentials {
    /// Resolve credentials for `section`, preferring environment variables
    /// over the edgerc file at `path`.
    ///
    /// Only the default `~/.edgerc` may be absent when the environment
    /// supplies the credentials; any other path must exist.
    pub fn resolve(path: &Path, section: &str) -> Result<Self> {
        if path != default_edgerc_path() && !path.is_file() {
            return Err(AaError::EdgercNotFound(path.to_path_buf()));
        }
        if let Some(creds) = Self::from_env(section, |key| std::env::var(key).ok())? {
            return Ok(creds);
        }
        Self::from_edgerc(path, section)
    }

    /// Load credentials for `section` from the edgerc file at `path`.
    pub fn from_edgerc(path: &Path, section: &str) -> Result<Self> {
        if !path.is_file() {
            return Err(AaError::EdgercNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_ini_str(&content, section)
    }

    /// Parse credentials for `section` out of edgerc text.
    pub fn from_ini_str(content: &str, section: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Ini))
            .build()?;
        let sections: HashMap<String, HashMap<String, String>> = settings.try_deserialize()?;

        let fields = sections
            .get(section)
            .or_else(|| {
                sections
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(section))
                    .map(|(_, fields)| fields)
            })
            .ok_or_else(|| AaError::SectionNotFound(section.to_string()))?;

        let max_body = match fields.get("max-body").or_else(|| fields.get("max_body")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AaError::Config(format!("Invalid max-body value '{}'", raw)))?,
            None => DEFAULT_MAX_BODY,
        };

        Self::from_parts(
            fields.get("host").cloned(),
            fields.get("client_token").cloned(),
            fields.get("client_secret").cloned(),
            fields.get("access_token").cloned(),
            max_body,
        )
    }

    /// Build credentials from `AKAMAI_*` variables looked up through `lookup`.
    ///
    /// Returns `Ok(None)` unless all four credential variables are present.
    /// Section `default` reads `AKAMAI_HOST`, any other section reads
    /// `AKAMAI_<SECTION>_HOST` and so on.
    pub fn from_env<F>(section: &str, lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = if section == DEFAULT_SECTION {
            "AKAMAI_".to_string()
        } else {
            format!("AKAMAI_{}_", section.to_uppercase().replace('-', "_"))
        };
        let var = |name: &str| lookup(&format!("{}{}", prefix, name));

        let (host, client_token, client_secret, access_token) = match (
            var("HOST"),
            var("CLIENT_TOKEN"),
            var("CLIENT_SECRET"),
            var("ACCESS_TOKEN"),
        ) {
            (Some(h), Some(ct), Some(cs), Some(at)) => (h, ct, cs, at),
            _ => return Ok(None),
        };

        let max_body = var("MAX_BODY")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY);

        Self::from_parts(
            Some(host),
            Some(client_token),
            Some(client_secret),
            Some(access_token),
            max_body,
        )
        .map(Some)
    }

    fn from_parts(
        host: Option<String>,
        client_token: Option<String>,
        client_secret: Option<String>,
        access_token: Option<String>,
        max_body: usize,
    ) -> Result<Self> {
        fn required(value: Option<String>, field: &'static str) -> Result<String> {
            match value.map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(AaError::MissingCredential(field)),
            }
        }

        Ok(Self {
            host: required(host, "host")?,
            client_token: required(client_token, "client_token")?,
            client_secret: required(client_secret, "client_secret")?,
            access_token: required(access_token, "access_token")?,
            max_body,
        })
    }

    /// Base URL for API requests. A bare host gets `https://`.
    ///
    /// The host is normalized (lower-cased, default port dropped) the same
    /// way for signing and sending.
    pub fn base_url(&self) -> Result<Url> {
        let host = self.host.trim_end_matches('/');
        let raw = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        let url =
            Url::parse(&raw).map_err(|e| AaError::InvalidHost(format!("{}: {}", host, e)))?;
        if url.host_str().is_none() {
            return Err(AaError::InvalidHost(host.to_string()));
        }
        Ok(url)
    }
}
