//! HTTP server mode: paginated views over HTML and a JSON API
//!
//! Every session is an independent `PagedView`. The HTML routes follow
//! Post/Redirect/Get so a browser refresh never repeats a navigation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::config::{AppConfig, ServerConfig};
use crate::error::{Error, Result, ResultExt};
use crate::pagination::PageSize;
use crate::source::{load_dataset, DataSource};
use crate::view::{render_html, NavEvent, PageSnapshot, PagedView};

// ============================================================================
// State
// ============================================================================

/// Bounds on the session map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions kept before the least recently used one is evicted
    pub max_sessions: usize,
    /// Sessions untouched for this long are dropped
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for SessionLimits {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_sessions: config.max_sessions.max(1),
            idle_timeout: Duration::from_secs(config.session_idle_secs),
        }
    }
}

struct Session {
    view: PagedView,
    last_seen: Instant,
}

/// App state shared across handlers
pub struct AppState {
    source: Arc<dyn DataSource>,
    page_size: PageSize,
    limits: SessionLimits,
    sessions: RwLock<HashMap<u64, Session>>,
    next_id: AtomicU64,
}

impl AppState {
    /// Create server state that loads every new session from `source`
    pub fn new(source: Arc<dyn DataSource>, page_size: PageSize) -> Self {
        Self::with_limits(source, page_size, SessionLimits::default())
    }

    /// Create server state with explicit session bounds
    pub fn with_limits(
        source: Arc<dyn DataSource>,
        page_size: PageSize,
        limits: SessionLimits,
    ) -> Self {
        Self {
            source,
            page_size,
            limits,
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Load the dataset and register a new session on page 1
    ///
    /// Idle sessions are dropped first; if the map is still full the least
    /// recently used session makes room.
    async fn create_session(&self) -> (u64, PageSnapshot) {
        let report = load_dataset(self.source.as_ref()).await;
        let view = PagedView::from_report(self.page_size, report);
        let snapshot = view.snapshot();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.evict(&mut sessions, now);
        sessions.insert(
            id,
            Session {
                view,
                last_seen: now,
            },
        );
        info!(session = id, records = snapshot.total_records, "Session created");
        (id, snapshot)
    }

    fn evict(&self, sessions: &mut HashMap<u64, Session>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, session| now.duration_since(session.last_seen) < self.limits.idle_timeout);

        while sessions.len() >= self.limits.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_seen)
                .map(|(id, _)| *id);
            let Some(id) = oldest else { break };
            sessions.remove(&id);
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted sessions");
        }
    }

    /// Live session `id`, marked as used; an idle one is dropped instead
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<u64, Session>,
        id: u64,
    ) -> Result<&'a mut PagedView> {
        let now = Instant::now();
        let expired = sessions
            .get(&id)
            .is_some_and(|session| now.duration_since(session.last_seen) >= self.limits.idle_timeout);
        if expired {
            sessions.remove(&id);
            debug!(session = id, "Session expired");
        }

        let session = sessions.get_mut(&id).ok_or(Error::SessionNotFound { id })?;
        session.last_seen = now;
        Ok(&mut session.view)
    }

    async fn snapshot(&self, id: u64) -> Result<PageSnapshot> {
        let mut sessions = self.sessions.write().await;
        self.touch(&mut sessions, id).map(|view| view.snapshot())
    }

    async fn apply(&self, id: u64, action: SessionAction) -> Result<PageSnapshot> {
        match action {
            SessionAction::Navigate(event) => {
                let mut sessions = self.sessions.write().await;
                let view = self.touch(&mut sessions, id)?;
                view.handle(event);
                Ok(view.snapshot())
            }
            SessionAction::Reload => {
                // Fetch without holding the lock so other sessions stay responsive
                self.snapshot(id).await?;
                let report = load_dataset(self.source.as_ref()).await;

                let mut sessions = self.sessions.write().await;
                let view = self.touch(&mut sessions, id)?;
                view.replace_dataset(report);
                debug!(session = id, status = ?view.status(), "Session reloaded");
                Ok(view.snapshot())
            }
        }
    }

    /// Drop session `id`
    async fn remove_session(&self, id: u64) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or(Error::SessionNotFound { id })?;
        info!(session = id, "Session closed");
        Ok(())
    }
}

/// Action posted against a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    Navigate(NavEvent),
    Reload,
}

impl FromStr for SessionAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reload" => Ok(Self::Reload),
            "previous" => Ok(Self::Navigate(NavEvent::Previous)),
            "next" => Ok(Self::Navigate(NavEvent::Next)),
            other => Err(Error::Other(format!("Unknown session action: {other}"))),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Snapshot of one session, tagged with its id
#[derive(Debug, Serialize)]
struct SessionBody {
    id: u64,
    #[serde(flatten)]
    page: PageSnapshot,
}

fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiResponse::<()>::error(err.to_string()))).into_response()
}

fn session_json(status: StatusCode, id: u64, page: PageSnapshot) -> Response {
    (status, Json(ApiResponse::success(SessionBody { id, page }))).into_response()
}

fn session_path(id: u64) -> String {
    format!("/sessions/{id}")
}

// ============================================================================
// Server
// ============================================================================

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/sessions/:id", get(session_page))
        .route("/sessions/:id/:action", post(session_action))
        .route("/api/sessions", post(api_create_session))
        .route(
            "/api/sessions/:id",
            get(api_get_session).delete(api_delete_session),
        )
        .route("/api/sessions/:id/:action", post(api_session_action))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(config: &AppConfig, server: &ServerConfig) -> Result<()> {
    let source = config.build_source()?;
    info!(source = %source.describe(), page_size = %config.view.page_size, "Serving records");

    let limits = SessionLimits::from(server);
    info!(
        max_sessions = limits.max_sessions,
        idle_secs = limits.idle_timeout.as_secs(),
        "Session limits"
    );
    let state = Arc::new(AppState::with_limits(source, config.view.page_size, limits));
    let app = router(state);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("Starting HTTP server on http://{}", addr);

    axum::serve(listener, app)
        .await
        .with_context(|| "Server error".to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Start a new session and send the browser to it
async fn index(State(state): State<Arc<AppState>>) -> Redirect {
    let (id, _) = state.create_session().await;
    Redirect::to(&session_path(id))
}

async fn session_page(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    match state.snapshot(id).await {
        Ok(snapshot) => match render_html(&snapshot, &session_path(id)) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!(session = id, error = %e, "Page rendering failed");
                error_response(&e)
            }
        },
        Err(e) => error_response(&e),
    }
}

async fn session_action(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(u64, String)>,
) -> Response {
    let result = match action.parse() {
        Ok(action) => state.apply(id, action).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Redirect::to(&session_path(id)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn api_create_session(State(state): State<Arc<AppState>>) -> Response {
    let (id, snapshot) = state.create_session().await;
    session_json(StatusCode::CREATED, id, snapshot)
}

async fn api_get_session(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    match state.snapshot(id).await {
        Ok(snapshot) => session_json(StatusCode::OK, id, snapshot),
        Err(e) => error_response(&e),
    }
}

async fn api_delete_session(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    match state.remove_session(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

async fn api_session_action(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(u64, String)>,
) -> Response {
    let result = match action.parse() {
        Ok(action) => state.apply(id, action).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(snapshot) => session_json(StatusCode::OK, id, snapshot),
        Err(e) => error_response(&e),
    }
}
