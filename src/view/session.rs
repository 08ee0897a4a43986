//! Paged view session

use crate::error::Error;
use crate::pagination::{slice, PageSize, PaginationState};
use crate::source::{load_dataset, DataSource, LoadReport, LoadStatus};
use crate::types::{Dataset, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::watch;
use tracing::debug;

/// Navigation request issued by a view control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavEvent {
    /// "Previous" control
    Previous,
    /// "Next" control
    Next,
}

impl FromStr for NavEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" | "prev" | "p" => Ok(Self::Previous),
            "next" | "n" => Ok(Self::Next),
            other => Err(Error::Other(format!("Unknown navigation event: {other}"))),
        }
    }
}

/// Everything a view layer needs to draw the current page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// 1-indexed current page
    pub current_page: usize,
    /// Total number of pages (at least 1)
    pub total_pages: usize,
    /// Records in the whole dataset
    pub total_records: usize,
    /// Records per page
    pub page_size: usize,
    /// Records visible on the current page
    pub records: Vec<Record>,
    /// Whether the "Previous" control is enabled
    pub has_previous: bool,
    /// Whether the "Next" control is enabled
    pub has_next: bool,
    /// Outcome of the last load
    pub status: LoadStatus,
    /// When the dataset was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl PageSnapshot {
    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    /// Page indicator text
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// One paginated view session
///
/// Mutations go through `&mut self`, so a dataset replacement and the
/// matching page clamp can never be observed separately.
#[derive(Debug)]
pub struct PagedView {
    dataset: Dataset,
    state: PaginationState,
    status: LoadStatus,
    loaded_at: Option<DateTime<Utc>>,
    notifier: watch::Sender<PageSnapshot>,
}

impl PagedView {
    /// Create a view over an empty dataset, waiting for its first load
    pub fn new(page_size: PageSize) -> Self {
        Self::build(page_size, Dataset::empty(), LoadStatus::Pending, None)
    }

    /// Create a view over an already loaded dataset
    pub fn with_dataset(page_size: PageSize, dataset: Dataset) -> Self {
        let status = LoadStatus::Loaded {
            count: dataset.len(),
        };
        Self::build(page_size, dataset, status, None)
    }

    /// Create a view from a load report
    pub fn from_report(page_size: PageSize, report: LoadReport) -> Self {
        Self::build(
            page_size,
            report.dataset,
            report.status,
            Some(report.loaded_at),
        )
    }

    fn build(
        page_size: PageSize,
        dataset: Dataset,
        status: LoadStatus,
        loaded_at: Option<DateTime<Utc>>,
    ) -> Self {
        let state = PaginationState::with_len(page_size, dataset.len());
        let initial = snapshot_of(&dataset, &state, &status, loaded_at);
        let (notifier, _) = watch::channel(initial);

        Self {
            dataset,
            state,
            status,
            loaded_at,
            notifier,
        }
    }

    /// Pagination state of this view
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Outcome of the last load
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Full dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Records on the current page
    pub fn visible_records(&self) -> &[Record] {
        slice(
            self.dataset.records(),
            self.state.current_page(),
            self.state.page_size(),
        )
    }

    /// Current page as a snapshot
    pub fn snapshot(&self) -> PageSnapshot {
        snapshot_of(&self.dataset, &self.state, &self.status, self.loaded_at)
    }

    /// Subscribe to page changes
    ///
    /// The receiver sees the current snapshot immediately and a new one after
    /// every state change. No-op navigation publishes nothing.
    pub fn subscribe(&self) -> watch::Receiver<PageSnapshot> {
        self.notifier.subscribe()
    }

    /// Go to the previous page (no-op on the first page)
    pub fn previous(&mut self) -> usize {
        self.handle(NavEvent::Previous)
    }

    /// Go to the next page (no-op on the last page)
    pub fn next(&mut self) -> usize {
        self.handle(NavEvent::Next)
    }

    /// Apply a navigation event and return the resulting page
    pub fn handle(&mut self, event: NavEvent) -> usize {
        let page = match event {
            NavEvent::Previous => self.state.go_to_previous(),
            NavEvent::Next => self.state.go_to_next(),
        };
        debug!(?event, page, "Navigation");
        self.publish();
        page
    }

    /// Swap in a freshly loaded dataset, re-clamping the current page
    pub fn replace_dataset(&mut self, report: LoadReport) {
        let len = report.dataset.len();
        self.dataset = report.dataset;
        self.status = report.status;
        self.loaded_at = Some(report.loaded_at);
        if self.state.resize(len) {
            debug!(page = self.state.current_page(), "Current page clamped after reload");
        }
        self.publish();
    }

    /// Load (or re-load) the dataset from `source`
    ///
    /// A failed load leaves the view empty with a failed status, exactly as
    /// for the first load.
    pub async fn reload(&mut self, source: &dyn DataSource) -> &LoadStatus {
        let report = load_dataset(source).await;
        self.replace_dataset(report);
        &self.status
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.notifier.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

fn snapshot_of(
    dataset: &Dataset,
    state: &PaginationState,
    status: &LoadStatus,
    loaded_at: Option<DateTime<Utc>>,
) -> PageSnapshot {
    PageSnapshot {
        current_page: state.current_page(),
        total_pages: state.total_pages(),
        total_records: dataset.len(),
        page_size: state.page_size().get(),
        records: slice(dataset.records(), state.current_page(), state.page_size()).to_vec(),
        has_previous: state.has_previous(),
        has_next: state.has_next(),
        status: status.clone(),
        loaded_at,
    }
}
