// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Campaign Pager
//!
//! Fetches a list of crowdfunding campaign records once and presents it as a
//! fixed-size paginated table with "Previous"/"Next" navigation.
//!
//! ## Features
//!
//! - **Pagination core**: pure page arithmetic and slicing, always in bounds
//! - **Data sources**: HTTP (with timeout, retry and rate limiting), local file, in-memory
//! - **View sessions**: one `PagedView` per viewer, with change notifications
//! - **Front ends**: text, JSON and HTML renderers, an interactive CLI and an HTTP server
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campaign_pager::config::AppConfig;
//! use campaign_pager::source::load_dataset;
//! use campaign_pager::view::{render_text, PagedView};
//!
//! #[tokio::main]
//! async fn main() -> campaign_pager::Result<()> {
//!     let config = AppConfig::default();
//!     let source = config.build_source()?;
//!
//!     let report = load_dataset(source.as_ref()).await;
//!     let mut view = PagedView::from_report(config.view.page_size, report);
//!     view.next();
//!
//!     print!("{}", render_text(&view.snapshot()));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            CLI (show / browse)     HTTP server           │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────┐
//! │   view: PagedView sessions, watch notifications, render  │
//! └──────────────┬──────────────────────────────┬────────────┘
//!                │                              │
//! ┌──────────────┴─────────────┐ ┌──────────────┴────────────┐
//! │ pagination                 │ │ source                    │
//! │ PaginationState, slice     │ │ DataSource, load_dataset  │
//! └────────────────────────────┘ └──────────────┬────────────┘
//!                                               │
//!                                ┌──────────────┴────────────┐
//!                                │ http (retry, rate limit)  │
//!                                │ decode (JSON records)     │
//!                                └───────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Record and dataset types
pub mod types;

/// Page arithmetic and slicing
pub mod pagination;

/// Response decoders
pub mod decode;

/// HTTP client with retry and rate limiting
pub mod http;

/// Record sources and the load boundary
pub mod source;

/// Paged view sessions and renderers
pub mod view;

/// Application configuration
pub mod config;

/// Command-line interface and HTTP server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{PageSize, PaginationState};
pub use types::{Dataset, Record};
pub use view::{NavEvent, PageSnapshot, PagedView};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
