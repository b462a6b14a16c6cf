// Vehicle service - Use case for listing the fleet directory
use crate::application::fleet_repository::{FleetRepository, Session};
use crate::domain::vehicle::Vehicle;
use std::sync::Arc;

#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn FleetRepository>,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn FleetRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_vehicles(&self, session: &Session) -> anyhow::Result<Vec<Vehicle>> {
        self.repository.list_vehicles(session).await
    }
}
