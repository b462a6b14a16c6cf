// Per-vehicle driving metrics derived from one ordered sample sequence
use super::telemetry::Sample;
use serde::Serialize;

/// Speed above which a sample counts as a speeding violation.
pub const SPEEDING_THRESHOLD: f64 = 80.0;
/// Rough conversion: kilograms of CO2 emitted per litre of fuel burned.
pub const CO2_KG_PER_LITRE: f64 = 2.31;
/// Device reporting interval assumed when converting sample counts to hours.
pub const SAMPLE_INTERVAL_SECS: f64 = 5.0;

/// Scalar metrics summary for one vehicle over a time window. An empty
/// sample sequence yields the all-zero default, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMetrics {
    /// Odometer delta over the window, in kilometres.
    pub total_distance: f64,
    pub max_speed: f64,
    /// Mean over samples with positive speed only.
    pub avg_speed: f64,
    pub engine_on_percentage: f64,
    /// Accumulated idling, in hours.
    pub total_idling_time: f64,
    pub total_harsh_events: u32,
    pub speeding_violations: u32,
    /// First fuel reading minus last, in litres.
    pub fuel_consumption: f64,
    pub co2_emission: f64,
    pub driving_hours: f64,
    pub total_engine_hours: f64,
}

impl VehicleMetrics {
    pub fn from_samples(samples: &[Sample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let total_distance = if samples.len() > 1 {
            (samples[samples.len() - 1].odometer - samples[0].odometer) / 1000.0
        } else {
            0.0
        };

        let speeds: Vec<f64> = samples
            .iter()
            .map(|s| s.speed)
            .filter(|speed| *speed > 0.0)
            .collect();
        let max_speed = speeds.iter().copied().fold(0.0, f64::max);
        let avg_speed = if speeds.is_empty() {
            0.0
        } else {
            speeds.iter().sum::<f64>() / speeds.len() as f64
        };

        let engine_on_count = samples.iter().filter(|s| s.engine_on).count();
        let engine_on_percentage = engine_on_count as f64 / samples.len() as f64 * 100.0;

        let total_idling_seconds: f64 = samples.iter().map(|s| s.idling_time).sum();
        let total_harsh_events = samples
            .iter()
            .map(|s| s.harsh_acceleration + s.harsh_braking + s.harsh_cornering)
            .sum();
        let speeding_violations =
            speeds.iter().filter(|speed| **speed > SPEEDING_THRESHOLD).count() as u32;

        // Signed on purpose: a refuel inside the window shows up as negative
        // consumption (and negative CO2), not clamped to zero.
        let fuel_consumption = if samples.len() > 1 {
            samples[0].fuel_level - samples[samples.len() - 1].fuel_level
        } else {
            0.0
        };

        // Driving hours and engine hours share one formula: engine-on
        // sample count times the reporting interval.
        let engine_hours = engine_on_count as f64 * SAMPLE_INTERVAL_SECS / 3600.0;

        Self {
            total_distance,
            max_speed,
            avg_speed,
            engine_on_percentage,
            total_idling_time: total_idling_seconds / 3600.0,
            total_harsh_events,
            speeding_violations,
            fuel_consumption,
            co2_emission: fuel_consumption * CO2_KG_PER_LITRE,
            driving_hours: engine_hours,
            total_engine_hours: engine_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(speed: f64, odometer: f64, fuel: f64, engine_on: bool) -> Sample {
        Sample {
            speed,
            odometer,
            fuel_level: fuel,
            engine_on,
            ..Sample::default()
        }
    }

    #[test]
    fn test_empty_sequence_yields_default() {
        assert_eq!(VehicleMetrics::from_samples(&[]), VehicleMetrics::default());
    }

    #[test]
    fn test_single_sample_has_no_distance_or_fuel_delta() {
        let metrics = VehicleMetrics::from_samples(&[sample(50.0, 120_000.0, 70.0, true)]);

        assert_eq!(metrics.total_distance, 0.0);
        assert_eq!(metrics.fuel_consumption, 0.0);
        assert_eq!(metrics.max_speed, 50.0);
        assert_eq!(metrics.engine_on_percentage, 100.0);
    }

    #[test]
    fn test_distance_is_odometer_delta_in_km() {
        let metrics = VehicleMetrics::from_samples(&[
            sample(0.0, 1000.0, 80.0, false),
            sample(40.0, 1200.0, 75.0, true),
            sample(45.0, 1500.0, 60.0, true),
        ]);

        assert_eq!(metrics.total_distance, 0.5);
        assert_eq!(metrics.fuel_consumption, 20.0);
        assert!((metrics.co2_emission - 46.2).abs() < 1e-9);
    }

    #[test]
    fn test_speed_stats_ignore_stationary_samples() {
        let metrics = VehicleMetrics::from_samples(&[
            sample(0.0, 0.0, 0.0, false),
            sample(60.0, 0.0, 0.0, true),
            sample(90.0, 0.0, 0.0, true),
        ]);

        assert_eq!(metrics.max_speed, 90.0);
        assert_eq!(metrics.avg_speed, 75.0);
        assert_eq!(metrics.speeding_violations, 1);
    }

    #[test]
    fn test_speeding_threshold_is_exclusive() {
        let metrics = VehicleMetrics::from_samples(&[
            sample(80.0, 0.0, 0.0, true),
            sample(80.1, 0.0, 0.0, true),
        ]);

        assert_eq!(metrics.speeding_violations, 1);
    }

    #[test]
    fn test_engine_hours_from_sample_count() {
        let samples: Vec<Sample> = (0..720)
            .map(|_| sample(30.0, 0.0, 0.0, true))
            .collect();
        let metrics = VehicleMetrics::from_samples(&samples);

        // 720 engine-on samples at 5s each is exactly one hour
        assert_eq!(metrics.driving_hours, 1.0);
        assert_eq!(metrics.total_engine_hours, 1.0);
        assert_eq!(metrics.engine_on_percentage, 100.0);
    }

    #[test]
    fn test_engine_on_percentage_bounds() {
        let metrics = VehicleMetrics::from_samples(&[
            sample(0.0, 0.0, 0.0, true),
            sample(0.0, 0.0, 0.0, false),
            sample(0.0, 0.0, 0.0, false),
            sample(0.0, 0.0, 0.0, true),
        ]);

        assert_eq!(metrics.engine_on_percentage, 50.0);
    }

    #[test]
    fn test_idling_time_converted_to_hours() {
        let mut first = sample(0.0, 0.0, 0.0, true);
        first.idling_time = 1800.0;
        let mut second = sample(0.0, 0.0, 0.0, true);
        second.idling_time = 1800.0;

        let metrics = VehicleMetrics::from_samples(&[first, second]);
        assert_eq!(metrics.total_idling_time, 1.0);
    }

    #[test]
    fn test_harsh_events_sum_all_three_counters() {
        let mut first = sample(0.0, 0.0, 0.0, true);
        first.harsh_acceleration = 2;
        first.harsh_braking = 1;
        let mut second = sample(0.0, 0.0, 0.0, true);
        second.harsh_cornering = 3;

        let metrics = VehicleMetrics::from_samples(&[first, second]);
        assert_eq!(metrics.total_harsh_events, 6);
    }

    #[test]
    fn test_refuel_keeps_signed_consumption() {
        let metrics = VehicleMetrics::from_samples(&[
            sample(0.0, 0.0, 30.0, true),
            sample(0.0, 100.0, 95.0, true),
        ]);

        assert_eq!(metrics.fuel_consumption, -65.0);
        assert!(metrics.co2_emission < 0.0);
    }
}
