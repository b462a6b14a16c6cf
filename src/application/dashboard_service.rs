// Dashboard service - concurrent per-vehicle fan-out over the vendor API
use crate::application::fleet_repository::{FleetRepository, Session};
use crate::domain::chart::ChartDataset;
use crate::domain::fleet::{FleetSummary, VehicleResult};
use crate::domain::telemetry::normalize_messages;
use crate::domain::vehicle::Vehicle;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A vehicle task panicked or was cancelled; the whole batch is
    /// discarded rather than surfacing a partial dashboard.
    #[error("vehicle batch failed: {0}")]
    Batch(#[from] tokio::task::JoinError),
}

/// Everything the presentation layer needs for one dashboard refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDashboard {
    pub units: Vec<VehicleResult>,
    pub summary: FleetSummary,
    pub chart_data: ChartDataset,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn FleetRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository }
    }

    /// Fetches and aggregates every selected vehicle concurrently. Results
    /// come back in selection order regardless of completion order; a
    /// vehicle whose fetch fails keeps its slot with the error recorded
    /// instead of aborting its siblings.
    pub async fn load_fleet(
        &self,
        session: &Session,
        vehicles: Vec<Vehicle>,
        from: i64,
        to: i64,
    ) -> Result<FleetDashboard, DashboardError> {
        let mut handles = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let repository = self.repository.clone();
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                load_vehicle(repository, session, vehicle, from, to).await
            }));
        }

        // Awaiting in spawn order keeps selection order in the output
        let mut units = Vec::with_capacity(handles.len());
        for joined in futures::future::join_all(handles).await {
            units.push(joined?);
        }

        let summary = FleetSummary::from_results(&units);
        let chart_data = ChartDataset::from_results(&units);
        Ok(FleetDashboard {
            units,
            summary,
            chart_data,
        })
    }
}

async fn load_vehicle(
    repository: Arc<dyn FleetRepository>,
    session: Session,
    vehicle: Vehicle,
    from: i64,
    to: i64,
) -> VehicleResult {
    match repository.load_messages(&session, vehicle.id, from, to).await {
        Ok(messages) => {
            let samples = normalize_messages(&messages);
            tracing::debug!(unit = vehicle.id, samples = samples.len(), "vehicle loaded");
            VehicleResult::from_samples(vehicle, samples)
        }
        Err(e) => {
            tracing::warn!(unit = vehicle.id, error = %e, "message fetch failed");
            VehicleResult::failed(vehicle, e.to_string())
        }
    }
}
