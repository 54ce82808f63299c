//! Adaptive Acceleration Core Library
//!
//! Shared request models, EdgeGrid credential resolution, and request
//! signing for the Adaptive Acceleration reporting CLI.

pub mod api;
pub mod edgegrid;
pub mod edgerc;
pub mod error;

// Re-export commonly used types
pub use api::{Endpoint, MeasuresQuery};
pub use edgegrid::Signer;
pub use edgerc::{default_edgerc_path, Credentials, DEFAULT_SECTION};
pub use error::*;
