//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use crate::types::Record;
use serde::{Deserialize, Serialize};

/// Configuration for decoding responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Dot path to the record array inside the document (e.g. `$.data.items`)
    #[serde(default)]
    pub record_path: Option<String>,
}

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Record>>;
}
