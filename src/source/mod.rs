//! Data source module
//!
//! # Overview
//!
//! A `DataSource` produces the ordered campaign records once per load. The
//! loader in this module is the boundary between fallible retrieval and the
//! infallible view: whatever goes wrong (transport failure, HTTP error,
//! malformed payload) is logged and turned into an empty dataset, so the
//! pagination core never sees an error.

mod loader;
mod sources;

pub use loader::{load_dataset, LoadReport, LoadStatus};
pub use sources::{DataSource, FileSource, HttpSource, StaticSource};
