// Fleet aggregation - per-vehicle results and the fleet-wide summary
use super::metrics::VehicleMetrics;
use super::telemetry::Sample;
use super::vehicle::Vehicle;
use serde::Serialize;

/// Outcome of one vehicle's fetch-and-aggregate pass. A failed fetch keeps
/// its slot in the batch with default metrics and the error recorded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResult {
    pub id: u64,
    pub name: String,
    /// Full sample sequence, kept for chart and report building but not
    /// serialized to the dashboard payload.
    #[serde(skip)]
    pub samples: Vec<Sample>,
    pub metrics: VehicleMetrics,
    pub last_sample: Option<Sample>,
    pub error: Option<String>,
}

impl VehicleResult {
    pub fn from_samples(vehicle: Vehicle, samples: Vec<Sample>) -> Self {
        let metrics = VehicleMetrics::from_samples(&samples);
        let last_sample = samples.last().cloned();
        Self {
            id: vehicle.id,
            name: vehicle.name,
            samples,
            metrics,
            last_sample,
            error: None,
        }
    }

    pub fn failed(vehicle: Vehicle, error: String) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            samples: Vec::new(),
            metrics: VehicleMetrics::default(),
            last_sample: None,
            error: Some(error),
        }
    }
}

/// Aggregate over the error-free vehicles only. Errored vehicles keep their
/// slots in per-vehicle views but contribute nothing here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_units: usize,
    pub total_distance: f64,
    pub total_fuel_consumption: f64,
    pub total_harsh_events: u32,
    pub avg_speed: f64,
    pub total_co2: f64,
}

impl FleetSummary {
    pub fn from_results(results: &[VehicleResult]) -> Self {
        let valid: Vec<&VehicleResult> = results.iter().filter(|r| r.error.is_none()).collect();

        let avg_speed = if valid.is_empty() {
            0.0
        } else {
            valid.iter().map(|r| r.metrics.avg_speed).sum::<f64>() / valid.len() as f64
        };

        Self {
            total_units: valid.len(),
            total_distance: valid.iter().map(|r| r.metrics.total_distance).sum(),
            total_fuel_consumption: valid.iter().map(|r| r.metrics.fuel_consumption).sum(),
            total_harsh_events: valid.iter().map(|r| r.metrics.total_harsh_events).sum(),
            avg_speed,
            total_co2: valid.iter().map(|r| r.metrics.co2_emission).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, avg_speed: f64, distance: f64, error: Option<&str>) -> VehicleResult {
        VehicleResult {
            id: 1,
            name: name.to_string(),
            samples: Vec::new(),
            metrics: VehicleMetrics {
                avg_speed,
                total_distance: distance,
                fuel_consumption: 10.0,
                total_harsh_events: 2,
                co2_emission: 23.1,
                ..VehicleMetrics::default()
            },
            last_sample: None,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_summary_over_mixed_results() {
        let results = vec![
            result("A", 40.0, 12.5, None),
            result("B", 60.0, 7.5, None),
            result("C", 0.0, 0.0, Some("timeout")),
        ];

        let summary = FleetSummary::from_results(&results);
        assert_eq!(summary.total_units, 2);
        assert_eq!(summary.total_distance, 20.0);
        assert_eq!(summary.total_fuel_consumption, 20.0);
        assert_eq!(summary.total_harsh_events, 4);
        assert_eq!(summary.avg_speed, 50.0);
    }

    #[test]
    fn test_summary_when_every_vehicle_errored() {
        let results = vec![
            result("A", 40.0, 12.5, Some("auth")),
            result("B", 60.0, 7.5, Some("timeout")),
        ];

        let summary = FleetSummary::from_results(&results);
        assert_eq!(summary, FleetSummary::default());
    }

    #[test]
    fn test_summary_of_empty_batch() {
        assert_eq!(FleetSummary::from_results(&[]), FleetSummary::default());
    }

    #[test]
    fn test_failed_result_keeps_default_metrics() {
        let failed = VehicleResult::failed(Vehicle::new(9, "T-9".into()), "no route".into());

        assert_eq!(failed.metrics, VehicleMetrics::default());
        assert!(failed.samples.is_empty());
        assert!(failed.last_sample.is_none());
        assert_eq!(failed.error.as_deref(), Some("no route"));
    }
}
