//! View module
//!
//! # Overview
//!
//! `PagedView` is the per-session object tying a dataset to its pagination
//! state. It is owned by whoever drives the session (the interactive CLI
//! loop or one entry of the server's session map); there is no shared or
//! global view state. Every change is published synchronously as a
//! `PageSnapshot` on a `tokio::sync::watch` channel, which the renderers in
//! this module turn into a text or HTML table.

mod render;
mod session;

pub use render::{render_html, render_text, EMPTY_MESSAGE};
pub use session::{NavEvent, PageSnapshot, PagedView};
