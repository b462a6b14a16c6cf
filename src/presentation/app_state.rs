// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::fleet_repository::Session;
use crate::application::report_service::ReportService;
use crate::application::vehicle_service::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub vehicle_service: VehicleService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
}
