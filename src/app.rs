#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::aggregate::{self, Summary};
use crate::chart::{self, CaseSelection, ChartSpec, InvalidSelection, SupplySelection, ZoneSelection};
use crate::layout;
use crate::render;
use crate::table::CaseTable;

/// Development bind address; fixed in source, like the data file path.
pub const BIND_ADDR: &str = "127.0.0.1:3000";

/// Shared read-only application state.
///
/// Everything here is built once before the listener binds and never written
/// afterwards, so it is shared through a plain `Arc` with no locking.
pub struct AppState {
    table: CaseTable,
    summary: Summary,
    page: String,
}

#[derive(Deserialize)]
struct ChartQuery {
    selection: Option<String>,
}

/// Aggregates the table, builds the page, and serves the dashboard.
pub async fn run(table: CaseTable) -> Result<(), Box<dyn std::error::Error>> {
    let summary = aggregate::summarize(&table);
    let page = layout::build_page(&summary)?;

    let app_state = Arc::new(AppState {
        table,
        summary,
        page,
    });

    // Build router
    let app = Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/summary", get(get_summary))
        .route("/api/chart/:kind", get(get_chart_spec))
        .route("/chart/:kind", get(get_chart_png))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(BIND_ADDR).await?;
    log::info!("Listening on http://{}", BIND_ADDR);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn get_summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(state.summary)
}

async fn get_chart_spec(
    Path(kind): Path<String>,
    Query(params): Query<ChartQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match spec_for(&state, &kind, params.selection.as_deref()) {
        Some(spec) => Json(spec).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_chart_png(
    Path(kind): Path<String>,
    Query(params): Query<ChartQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let kind = kind.strip_suffix(".png").unwrap_or(&kind);

    let spec = match spec_for(&state, kind, params.selection.as_deref()) {
        Some(spec) => spec,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    match render::render_chart(&spec) {
        Ok(png_data) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .header(header::CACHE_CONTROL, "no-store")
            .body(axum::body::Body::from(png_data))
            .unwrap(),
        Err(e) => {
            log::error!("failed to render {} chart: {}", kind, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Dispatches one dropdown update to its handler.
///
/// Unknown chart kinds yield `None` (a 404); an unrecognized selection value
/// logs a warning and falls back to the `All` behavior, so bad query input
/// can never take the server down.
fn spec_for(state: &AppState, kind: &str, selection: Option<&str>) -> Option<ChartSpec> {
    match kind {
        "bar" => Some(chart::bar_chart(
            &state.table,
            resolve(selection, CaseSelection::parse),
        )),
        "line" => Some(chart::line_chart(
            &state.table,
            resolve(selection, SupplySelection::parse),
        )),
        "pie" => Some(chart::pie_chart(
            &state.table,
            resolve(selection, ZoneSelection::parse),
        )),
        _ => None,
    }
}

fn resolve<S: Default>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<S, InvalidSelection>,
) -> S {
    match raw {
        None => S::default(),
        Some(value) => parse(value).unwrap_or_else(|err| {
            log::warn!("{}; falling back to All", err);
            S::default()
        }),
    }
}
