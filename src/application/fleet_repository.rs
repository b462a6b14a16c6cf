// Repository trait for the vendor telemetry API
use crate::domain::telemetry::RawMessage;
use crate::domain::vehicle::Vehicle;
use async_trait::async_trait;

/// Authenticated vendor session. Minted once by the transport adapter and
/// passed explicitly into every call; never held as ambient state.
#[derive(Debug, Clone)]
pub struct Session(String);

impl Session {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// List the vehicle directory visible to this session.
    async fn list_vehicles(&self, session: &Session) -> anyhow::Result<Vec<Vehicle>>;

    /// Load raw messages for one vehicle over an inclusive unix-second window.
    async fn load_messages(
        &self,
        session: &Session,
        unit_id: u64,
        from: i64,
        to: i64,
    ) -> anyhow::Result<Vec<RawMessage>>;
}
