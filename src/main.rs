// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::report_service::ReportService;
use crate::application::vehicle_service::VehicleService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::wialon_repository::WialonRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{export_report, get_dashboard, health_check, list_vehicles};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repository (infrastructure layer) and mint the session handle
    let repository = Arc::new(WialonRepository::new(app_config.wialon.base_url));
    let session = repository.login(&app_config.wialon.token).await?;
    tracing::info!("authenticated against the telemetry provider");

    // Create services (application layer)
    let vehicle_service = VehicleService::new(repository.clone());
    let dashboard_service = DashboardService::new(repository.clone());
    let report_service = ReportService::new(dashboard_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        session,
        vehicle_service,
        dashboard_service,
        report_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/vehicles", get(list_vehicles))
        .route("/dashboard", get(get_dashboard))
        .route("/report", get(export_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.bind.parse()?;
    tracing::info!(%addr, "starting fleet-telemetry service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
