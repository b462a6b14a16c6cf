// Vehicle directory domain model
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
}

impl Vehicle {
    pub fn new(id: u64, name: String) -> Self {
        let name = if name.trim().is_empty() {
            // Some trackers register without a display name
            format!("Unit {id}")
        } else {
            name
        };
        Self { id, name }
    }
}
