// Chart-ready series - down-sampled time points and per-vehicle comparisons
use super::fleet::VehicleResult;
use serde::Serialize;

/// Every n-th sample per vehicle goes on the time axis.
const SAMPLE_STRIDE: usize = 10;
/// The combined time series keeps only this many trailing points.
const MAX_TIME_POINTS: usize = 50;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub time: String,
    pub unit: String,
    pub speed: f64,
    pub fuel: f64,
    pub engine_on: u8,
}

/// One summary row per vehicle for the comparative bar charts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleComparison {
    pub name: String,
    pub distance: f64,
    pub fuel: f64,
    pub harsh_events: u32,
    pub co2: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub time_data: Vec<ChartPoint>,
    pub unit_metrics: Vec<VehicleComparison>,
}

impl ChartDataset {
    /// Builds the plotting payload. The stride/truncation rule is a volume
    /// tradeoff shared with the chart consumers, so the exact modulo-10 and
    /// last-50 behavior must hold: points are collected vehicle-major and
    /// time-minor, then the tail is kept without re-sorting.
    pub fn from_results(results: &[VehicleResult]) -> Self {
        let mut time_data = Vec::new();
        for result in results {
            for (index, sample) in result.samples.iter().enumerate() {
                if index % SAMPLE_STRIDE != 0 {
                    continue;
                }
                time_data.push(ChartPoint {
                    time: sample.timestamp.format("%H:%M:%S").to_string(),
                    unit: result.name.clone(),
                    speed: sample.speed,
                    fuel: sample.fuel_level,
                    engine_on: u8::from(sample.engine_on),
                });
            }
        }
        if time_data.len() > MAX_TIME_POINTS {
            time_data.drain(..time_data.len() - MAX_TIME_POINTS);
        }

        let unit_metrics = results
            .iter()
            .map(|result| VehicleComparison {
                name: result.name.clone(),
                distance: result.metrics.total_distance,
                fuel: result.metrics.fuel_consumption,
                harsh_events: result.metrics.total_harsh_events,
                co2: result.metrics.co2_emission,
            })
            .collect();

        Self {
            time_data,
            unit_metrics,
        }
    }
}
