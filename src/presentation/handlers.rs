// HTTP request handlers
use crate::application::report_service::{parse_day_start, ReportError};
use crate::domain::report::DateRange;
use crate::domain::vehicle::Vehicle;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub from: String,
    pub to: String,
    /// Comma-separated unit ids; all known units when absent.
    pub units: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the vehicle directory
pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> Response {
    match state.vehicle_service.list_vehicles(&state.session).await {
        Ok(vehicles) => Json(vehicles).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "vehicle listing failed");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

/// Aggregated dashboard for the selected vehicles and date window
pub async fn get_dashboard(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (from, to) = match parse_window(&query) {
        Ok(window) => window,
        Err(response) => return response,
    };
    let vehicles = match select_vehicles(&state, query.units.as_deref()).await {
        Ok(vehicles) => vehicles,
        Err(response) => return response,
    };

    match state
        .dashboard_service
        .load_fleet(&state.session, vehicles, from, to)
        .await
    {
        Ok(dashboard) => Json(dashboard).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "dashboard batch failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Exportable report for the selected vehicles and date window
pub async fn export_report(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let vehicles = match select_vehicles(&state, query.units.as_deref()).await {
        Ok(vehicles) => vehicles,
        Err(response) => return response,
    };
    let period = DateRange {
        from: query.from.clone(),
        to: query.to.clone(),
    };

    match state
        .report_service
        .generate(&state.session, vehicles, period)
        .await
    {
        Ok(report) => (
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            report,
        )
            .into_response(),
        Err(ReportError::InvalidDate { .. }) => {
            (StatusCode::BAD_REQUEST, "invalid date, expected YYYY-MM-DD").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "report generation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn parse_window(query: &RangeQuery) -> Result<(i64, i64), Response> {
    match (parse_day_start(&query.from), parse_day_start(&query.to)) {
        (Ok(from), Ok(to)) => Ok((from, to)),
        _ => Err((StatusCode::BAD_REQUEST, "invalid date, expected YYYY-MM-DD").into_response()),
    }
}

/// Resolves the requested unit ids against the directory, keeping the
/// caller's selection order. Unknown ids are ignored.
async fn select_vehicles(state: &AppState, units: Option<&str>) -> Result<Vec<Vehicle>, Response> {
    let directory = match state.vehicle_service.list_vehicles(&state.session).await {
        Ok(directory) => directory,
        Err(e) => {
            tracing::error!(error = %e, "vehicle listing failed");
            return Err(StatusCode::BAD_GATEWAY.into_response());
        }
    };
    let Some(units) = units else {
        return Ok(directory);
    };

    let mut selected = Vec::new();
    for token in units.split(',').filter(|t| !t.trim().is_empty()) {
        let Ok(id) = token.trim().parse::<u64>() else {
            return Err((StatusCode::BAD_REQUEST, "invalid unit id").into_response());
        };
        if let Some(vehicle) = directory.iter().find(|v| v.id == id) {
            selected.push(vehicle.clone());
        }
    }
    Ok(selected)
}
