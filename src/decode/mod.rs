//! Response decoder module
//!
//! # Overview
//!
//! Turns the body of the source document into campaign records. The payload
//! must be a JSON array of objects, either at the top level or at a
//! configured record path inside an envelope object. Anything else is an
//! error for the caller to handle; the decoder itself never falls back to
//! an empty dataset.

mod decoders;
mod types;

pub use decoders::JsonDecoder;
pub use types::{DecoderConfig, RecordDecoder};
