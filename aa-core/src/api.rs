//! API models for the Adaptive Acceleration reporting API
//!
//! Responses are passed through untouched as `serde_json::Value`; only the
//! request side is modelled here.

use crate::error::{AaError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Path segments shared by every reporting endpoint
pub const BASE_SEGMENTS: [&str; 2] = ["billing", "v1"];

/// Query object sent to the measures endpoint.
///
/// The server requires at least one contract or reporting group ID and a
/// month in 1-12; neither rule is checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuresQuery {
    /// Month (1-12) to aggregate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Year to aggregate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Contract identifiers to filter on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contract_ids: Vec<String>,
    /// Reporting group identifiers to filter on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reporting_group_ids: Vec<String>,
    /// Product identifiers; empty means unfiltered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<String>,
    /// Statistic names; empty means unfiltered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statistic_types: Vec<String>,
}

/// Reporting endpoints, one per CLI command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Measures,
    ReportingGroupUsage(String),
    ReportingGroupStatistics(String),
    ContractUsage(String),
    ContractStatistics(String),
}

impl Endpoint {
    /// Unescaped path segments below the API host
    pub fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = BASE_SEGMENTS.to_vec();
        match self {
            Endpoint::Measures => segments.push("measures"),
            Endpoint::ReportingGroupUsage(id) => {
                segments.extend(["reporting-groups", id.as_str(), "usage"])
            }
            Endpoint::ReportingGroupStatistics(id) => {
                segments.extend(["reporting-groups", id.as_str(), "statistics"])
            }
            Endpoint::ContractUsage(id) => segments.extend(["contracts", id.as_str(), "usage"]),
            Endpoint::ContractStatistics(id) => {
                segments.extend(["contracts", id.as_str(), "statistics"])
            }
        }
        segments
    }

    /// Request URL below `base`, with the ID percent-encoded as one segment.
    ///
    /// URL parsing resolves `.` and `..` (escaped or not) as relative
    /// segments, so IDs made of only those are rejected.
    pub fn url(&self, base: &Url) -> Result<Url> {
        if let Some(id) = self.id() {
            if id == "." || id == ".." {
                return Err(AaError::InvalidPathId(id.to_string()));
            }
        }

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| AaError::InvalidHost(base.to_string()))?
            .pop_if_empty()
            .extend(self.segments());
        Ok(url)
    }

    /// Short name used in log lines and error messages
    pub fn name(&self) -> String {
        self.segments()[BASE_SEGMENTS.len()..].join("/")
    }

    fn id(&self) -> Option<&str> {
        match self {
            Endpoint::Measures => None,
            Endpoint::ReportingGroupUsage(id)
            | Endpoint::ReportingGroupStatistics(id)
            | Endpoint::ContractUsage(id)
            | Endpoint::ContractStatistics(id) => Some(id.as_str()),
        }
    }
}

/// RFC 7807 problem document returned by the API on failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type", default)]
    pub problem_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl Problem {
    /// One-line summary of title and detail, if either is present
    pub fn summary(&self) -> Option<String> {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
            (Some(title), None) => Some(title.clone()),
            (None, Some(detail)) => Some(detail.clone()),
            (None, None) => None,
        }
    }
}
