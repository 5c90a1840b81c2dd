//! HTTP route handlers.
//!
//! The dashboard follows a rerun model: every action (search, select,
//! refresh) mutates the session and re-renders the whole page. Client
//! errors degrade to an empty view plus a warning; they never surface as
//! HTTP failures.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;
use tracing::warn;

use crate::normalize::{average_delay_by_line, normalize};
use crate::vbb::{DEFAULT_WINDOW_MINUTES, VbbSource};

use super::dto::*;
use super::state::{AppState, BoardSnapshot, Session};
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/search", get(run_search))
        .route("/select", get(select_station))
        .route("/refresh", get(refresh_board))
        .route("/api/board", get(board_json))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Render the dashboard from current session state.
async fn board_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.read().await;
    render_page(&state, &session, Vec::new())
}

/// Run a station search and auto-select the first usable candidate.
async fn run_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = params.q.unwrap_or_default().trim().to_string();

    let mut session = state.session.write().await;
    session.set_query(&query);

    let mut warnings = Vec::new();

    if query.is_empty() {
        // Nothing to look up; the page shows the search hint.
        return render_page(&state, &session, warnings);
    }

    match state.vbb.search_stations(&query).await {
        Ok(candidates) => {
            if candidates.is_empty() {
                warnings.push("No stations found matching your query.".to_string());
            }
            session.set_candidates(candidates);
        }
        Err(e) => {
            warn!("station search failed: {e}");
            warnings.push(format!("Error searching for stations: {e}"));
            session.set_candidates(Vec::new());
        }
    }

    // Mirror the selectbox default: pick the first usable candidate and
    // load its board right away.
    if let Some(id) = session.first_selectable().and_then(|c| c.id.clone()) {
        if session.select(&id).is_some() {
            load_board(&state.vbb, &mut session, &mut warnings).await;
        }
    } else if !session.candidates().is_empty() {
        warnings.push("No valid stations found in search results.".to_string());
    }

    render_page(&state, &session, warnings)
}

/// Select a station from the current candidate list.
async fn select_station(
    State(state): State<AppState>,
    Query(params): Query<SelectParams>,
) -> Result<Response, AppError> {
    if params.id.is_empty() {
        return Err(AppError::BadRequest {
            message: "Missing station id".to_string(),
        });
    }

    let mut session = state.session.write().await;
    let mut warnings = Vec::new();

    match session.select(&params.id) {
        Some(_) => load_board(&state.vbb, &mut session, &mut warnings).await,
        None => warnings.push("Unknown station selection.".to_string()),
    }

    render_page(&state, &session, warnings)
}

/// Explicitly refresh the board for the current selection.
async fn refresh_board(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut session = state.session.write().await;
    let mut warnings = Vec::new();

    if session.selected().is_some() {
        session.invalidate_board();
        load_board(&state.vbb, &mut session, &mut warnings).await;
    } else {
        warnings.push("Select a station before refreshing.".to_string());
    }

    render_page(&state, &session, warnings)
}

/// JSON view of the current board.
async fn board_json(State(state): State<AppState>) -> Json<BoardResponse> {
    let session = state.session.read().await;

    let (records, average_delay_by_line, skipped_records) = match session.board() {
        Some(board) => (
            board.records.clone(),
            board.delay_chart.clone(),
            board.skipped,
        ),
        None => (Vec::new(), Vec::new(), 0),
    };

    Json(BoardResponse {
        station: session.selected().cloned(),
        records,
        average_delay_by_line,
        skipped_records,
    })
}

/// Fetch and normalize departures for the current selection, unless the
/// cached board is still valid.
async fn load_board(vbb: &VbbSource, session: &mut Session, warnings: &mut Vec<String>) {
    let Some(station) = session.selected().cloned() else {
        return;
    };
    if session.board().is_some() {
        return;
    }

    match vbb.departures(&station.id, DEFAULT_WINDOW_MINUTES).await {
        Ok(raw) => {
            let board = normalize(&raw, Local::now().date_naive());

            for diagnostic in &board.skipped {
                warn!(
                    "skipping departure record {}: {}",
                    diagnostic.index, diagnostic.message
                );
            }
            if !board.skipped.is_empty() {
                warnings.push(format!(
                    "Skipped {} departure record(s) due to processing errors.",
                    board.skipped.len()
                ));
            }
            if board.records.is_empty() {
                warnings.push(format!(
                    "No departure data currently available for {}.",
                    station.name
                ));
            }

            let delay_chart = average_delay_by_line(&board.records);
            session.store_board(BoardSnapshot {
                records: board.records,
                delay_chart,
                skipped: board.skipped.len(),
            });
        }
        Err(e) => {
            warn!("departure fetch failed for {}: {e}", station.id);
            warnings.push(format!("Error getting departures: {e}"));
            // Degrade to an empty board; the user can retry via refresh.
            session.store_board(BoardSnapshot::default());
        }
    }
}

/// Render the full dashboard page.
fn render_page(
    state: &AppState,
    session: &Session,
    warnings: Vec<String>,
) -> Result<Response, AppError> {
    let candidates: Vec<CandidateView> = session
        .candidates()
        .iter()
        .filter_map(|c| {
            c.id.as_ref().map(|id| CandidateView {
                id: id.clone(),
                name: c.name.clone(),
                selected: session.selected().is_some_and(|s| s.id == *id),
            })
        })
        .collect();

    let (rows, bars) = match session.board() {
        Some(board) => (
            board.records.iter().map(RowView::from_record).collect(),
            DelayBarView::build(&board.delay_chart),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let template = BoardPageTemplate {
        demo: state.vbb.is_demo(),
        query: session.query().to_string(),
        warnings,
        candidates,
        selected: session.selected().map(|s| s.name.clone()),
        rows,
        bars,
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;

    Ok(Html(html).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
