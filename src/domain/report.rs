// Exportable performance report - vehicle and driver sections
use super::fleet::VehicleResult;
use serde::Serialize;

/// Organizational labels on every row.
const DEPARTMENT: &str = "PTT TANKER";
const DRIVER_ASSIGNMENT: &str = "PTT TANKER DRIVERS";

// Header text and column order are a compatibility contract with the
// consumers of the exported file; reproduce them verbatim.
const REPORT_TITLE: &str = "PTT Fleet Management Report";
const VEHICLE_SECTION_TITLE: &str = "VEHICLE PERFORMANCE SUMMARY";
const VEHICLE_HEADER: &str = "Department,Vehicle No.,Total Distance(KM),Driving Hours,Idling Duration,Engine Hours,Speeding Violations,Harsh Acceleration,Harsh Braking,Harsh Turning,Fuel Consumption(L),CO2 Emission(KG)";
const DRIVER_SECTION_TITLE: &str = "DRIVER PERFORMANCE SUMMARY";
const DRIVER_HEADER: &str = "Driver Name,Total Distance(KM),Driving Hours,Idling Duration,Engine Hours,Speeding Violations,Harsh Acceleration,Harsh Braking,Harsh Turning";

/// The literal from/to date strings of the query, echoed in the period line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleReportRow {
    pub department: String,
    pub vehicle_no: String,
    pub total_distance: f64,
    pub driving_hours: f64,
    pub idling_duration: f64,
    pub engine_hours: f64,
    pub speeding_violations: u32,
    pub harsh_acceleration: u32,
    pub harsh_braking: u32,
    pub harsh_turning: u32,
    pub fuel_consumption: f64,
    pub co2_emission: f64,
}

/// Driver rows mirror vehicle rows minus fuel and emissions; drivers are
/// not disambiguated from vehicles, so each vehicle stands in for its
/// driver. The assignment label rides on the row for the JSON surface but
/// is not a column of the exported driver section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReportRow {
    pub assignment: String,
    pub driver_name: String,
    pub total_distance: f64,
    pub driving_hours: f64,
    pub idling_duration: f64,
    pub engine_hours: f64,
    pub speeding_violations: u32,
    pub harsh_acceleration: u32,
    pub harsh_braking: u32,
    pub harsh_turning: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub period: DateRange,
    pub vehicle_rows: Vec<VehicleReportRow>,
    pub driver_rows: Vec<DriverReportRow>,
}

impl FleetReport {
    /// One vehicle row and one driver row per result, errored vehicles
    /// included with their defaulted metrics. The harsh sub-counters are
    /// re-summed straight from the sample sequence.
    pub fn build(results: &[VehicleResult], period: DateRange) -> Self {
        let vehicle_rows = results
            .iter()
            .map(|result| {
                let (acceleration, braking, cornering) = sum_harsh_counters(result);
                VehicleReportRow {
                    department: DEPARTMENT.to_string(),
                    vehicle_no: result.name.clone(),
                    total_distance: result.metrics.total_distance,
                    driving_hours: result.metrics.driving_hours,
                    idling_duration: result.metrics.total_idling_time,
                    engine_hours: result.metrics.total_engine_hours,
                    speeding_violations: result.metrics.speeding_violations,
                    harsh_acceleration: acceleration,
                    harsh_braking: braking,
                    harsh_turning: cornering,
                    fuel_consumption: result.metrics.fuel_consumption,
                    co2_emission: result.metrics.co2_emission,
                }
            })
            .collect();

        let driver_rows = results
            .iter()
            .map(|result| {
                let (acceleration, braking, cornering) = sum_harsh_counters(result);
                DriverReportRow {
                    assignment: DRIVER_ASSIGNMENT.to_string(),
                    driver_name: format!("Driver for {}", result.name),
                    total_distance: result.metrics.total_distance,
                    driving_hours: result.metrics.driving_hours,
                    idling_duration: result.metrics.total_idling_time,
                    engine_hours: result.metrics.total_engine_hours,
                    speeding_violations: result.metrics.speeding_violations,
                    harsh_acceleration: acceleration,
                    harsh_braking: braking,
                    harsh_turning: cornering,
                }
            })
            .collect();

        Self {
            period,
            vehicle_rows,
            driver_rows,
        }
    }

    /// Serializes the report as the downloadable comma-delimited document:
    /// title, period line, vehicle section, blank-line separator, driver
    /// section. Continuous fields carry exactly two decimals; counts stay
    /// raw integers.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(REPORT_TITLE);
        out.push_str("\n\n");
        out.push_str(&format!(
            "Report Period: {} to {}\n\n",
            self.period.from, self.period.to
        ));

        out.push_str(VEHICLE_SECTION_TITLE);
        out.push('\n');
        out.push_str(VEHICLE_HEADER);
        out.push('\n');
        for row in &self.vehicle_rows {
            out.push_str(&format!(
                "{},{},{:.2},{:.2},{:.2},{:.2},{},{},{},{},{:.2},{:.2}\n",
                row.department,
                row.vehicle_no,
                row.total_distance,
                row.driving_hours,
                row.idling_duration,
                row.engine_hours,
                row.speeding_violations,
                row.harsh_acceleration,
                row.harsh_braking,
                row.harsh_turning,
                row.fuel_consumption,
                row.co2_emission,
            ));
        }

        out.push_str("\n\n");
        out.push_str(DRIVER_SECTION_TITLE);
        out.push('\n');
        out.push_str(DRIVER_HEADER);
        out.push('\n');
        for row in &self.driver_rows {
            out.push_str(&format!(
                "{},{:.2},{:.2},{:.2},{:.2},{},{},{},{}\n",
                row.driver_name,
                row.total_distance,
                row.driving_hours,
                row.idling_duration,
                row.engine_hours,
                row.speeding_violations,
                row.harsh_acceleration,
                row.harsh_braking,
                row.harsh_turning,
            ));
        }

        out
    }
}

fn sum_harsh_counters(result: &VehicleResult) -> (u32, u32, u32) {
    result.samples.iter().fold((0, 0, 0), |(a, b, c), sample| {
        (
            a + sample.harsh_acceleration,
            b + sample.harsh_braking,
            c + sample.harsh_cornering,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::Sample;
    use crate::domain::vehicle::Vehicle;

    fn period() -> DateRange {
        DateRange {
            from: "2024-12-01".to_string(),
            to: "2024-12-07".to_string(),
        }
    }

    fn result_with_harsh_events() -> VehicleResult {
        let samples = vec![
            Sample {
                odometer: 1000.0,
                fuel_level: 80.0,
                harsh_acceleration: 2,
                engine_on: true,
                ..Sample::default()
            },
            Sample {
                odometer: 124_456.0,
                fuel_level: 60.0,
                harsh_braking: 1,
                harsh_cornering: 3,
                engine_on: true,
                ..Sample::default()
            },
        ];
        VehicleResult::from_samples(Vehicle::new(1, "TRUCK-01".into()), samples)
    }

    #[test]
    fn test_resummed_counters_match_metrics_total() {
        let result = result_with_harsh_events();
        let report = FleetReport::build(&[result.clone()], period());

        let row = &report.vehicle_rows[0];
        let resummed = row.harsh_acceleration + row.harsh_braking + row.harsh_turning;
        assert_eq!(resummed, result.metrics.total_harsh_events);
        assert_eq!(resummed, 6);
    }

    #[test]
    fn test_two_decimal_formatting() {
        let result = result_with_harsh_events();
        // odometer delta 123456 m -> 123.456 km, rendered to two decimals
        assert_eq!(result.metrics.total_distance, 123.456);

        let rendered = FleetReport::build(&[result], period()).render();
        assert!(rendered.contains("PTT TANKER,TRUCK-01,123.46,"));
    }

    #[test]
    fn test_layout_and_headers_are_verbatim() {
        let rendered = FleetReport::build(&[result_with_harsh_events()], period()).render();

        let expected_prefix = "PTT Fleet Management Report\n\n\
            Report Period: 2024-12-01 to 2024-12-07\n\n\
            VEHICLE PERFORMANCE SUMMARY\n\
            Department,Vehicle No.,Total Distance(KM),Driving Hours,Idling Duration,Engine Hours,Speeding Violations,Harsh Acceleration,Harsh Braking,Harsh Turning,Fuel Consumption(L),CO2 Emission(KG)\n";
        assert!(rendered.starts_with(expected_prefix));

        assert!(rendered.contains(
            "\n\nDRIVER PERFORMANCE SUMMARY\n\
             Driver Name,Total Distance(KM),Driving Hours,Idling Duration,Engine Hours,Speeding Violations,Harsh Acceleration,Harsh Braking,Harsh Turning\n"
        ));
    }

    #[test]
    fn test_driver_rows_reuse_vehicle_metrics_without_fuel() {
        let report = FleetReport::build(&[result_with_harsh_events()], period());

        let driver = &report.driver_rows[0];
        assert_eq!(driver.driver_name, "Driver for TRUCK-01");
        assert_eq!(driver.assignment, "PTT TANKER DRIVERS");
        assert_eq!(driver.total_distance, report.vehicle_rows[0].total_distance);

        // the driver section line carries no fuel or CO2 columns
        let rendered = report.render();
        let driver_line = rendered
            .lines()
            .find(|line| line.starts_with("Driver for "))
            .unwrap();
        assert_eq!(driver_line.split(',').count(), 9);
    }

    #[test]
    fn test_errored_vehicle_renders_zeroed_row() {
        let errored = VehicleResult::failed(Vehicle::new(2, "TRUCK-02".into()), "offline".into());
        let rendered = FleetReport::build(&[errored], period()).render();

        assert!(rendered.contains("PTT TANKER,TRUCK-02,0.00,0.00,0.00,0.00,0,0,0,0,0.00,0.00"));
    }
}
