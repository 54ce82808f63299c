//! Adaptive Acceleration CLI Library
//!
//! This library provides the core functionality for the `akamai-aa` CLI tool.
//!
//! # Public API
//!
//! The primary public API is the [`client::AaClient`] which provides
//! programmatic access to the reporting API. Configuration types are also
//! available via [`config::CliConfig`] and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use akamai_aa::client::AaClient;
//! use aa_core::MeasuresQuery;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = AaClient::from_edgerc(Path::new("/home/me/.edgerc"), "default", 30)?;
//!
//! let query = MeasuresQuery {
//!     month: Some(6),
//!     year: Some(2024),
//!     contract_ids: vec!["C-0N7RAC7".to_string()],
//!     ..Default::default()
//! };
//! let measures = client.list_measures(&query).await?;
//! println!("{}", measures);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the reporting API.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[cfg(test)]
pub mod test_utils;
