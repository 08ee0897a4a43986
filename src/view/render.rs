//! Text and HTML renderers for page snapshots

use super::session::PageSnapshot;
use crate::error::Result;
use crate::types::COLUMN_HEADERS;
use askama::Template;
use std::fmt::Write;

/// Placeholder shown instead of a table when there are no records
pub const EMPTY_MESSAGE: &str = "No data available";

/// Render a snapshot as a plain-text table with navigation controls
///
/// Disabled controls are shown in parentheses, enabled ones in brackets.
pub fn render_text(snapshot: &PageSnapshot) -> String {
    if snapshot.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let rows: Vec<[String; 3]> = snapshot.records.iter().map(|r| r.cells()).collect();
    let mut widths = COLUMN_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMN_HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    let _ = writeln!(
        out,
        "\n{}  {}  {}",
        control("Previous", snapshot.has_previous),
        snapshot.indicator(),
        control("Next", snapshot.has_next)
    );
    out
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

/// Page heading and document title
const PAGE_TITLE: &str = "Highly-Rated Kickstarter Projects";

/// HTML page over one snapshot; cell text is escaped by the template
#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    empty_message: &'a str,
    headers: [&'a str; 3],
    rows: Vec<[String; 3]>,
    indicator: String,
    has_previous: bool,
    has_next: bool,
    actions_base: &'a str,
}

impl<'a> PageTemplate<'a> {
    fn new(snapshot: &PageSnapshot, actions_base: &'a str) -> Self {
        Self {
            title: PAGE_TITLE,
            empty_message: EMPTY_MESSAGE,
            headers: COLUMN_HEADERS,
            rows: snapshot.records.iter().map(|r| r.cells()).collect(),
            indicator: snapshot.indicator(),
            has_previous: snapshot.has_previous,
            has_next: snapshot.has_next,
            actions_base: actions_base.trim_end_matches('/'),
        }
    }
}

/// Render a snapshot as an HTML page
///
/// Navigation buttons post to `{actions_base}/previous` and
/// `{actions_base}/next`; a control that cannot move is rendered `disabled`.
/// `actions_base` is emitted verbatim and must be a path built by the caller.
pub fn render_html(snapshot: &PageSnapshot, actions_base: &str) -> Result<String> {
    Ok(PageTemplate::new(snapshot, actions_base).render()?)
}
