// Report service - renders the exportable performance report
use crate::application::dashboard_service::{DashboardError, DashboardService};
use crate::application::fleet_repository::Session;
use crate::domain::report::{DateRange, FleetReport};
use crate::domain::vehicle::Vehicle;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report date '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

#[derive(Clone)]
pub struct ReportService {
    dashboard: DashboardService,
}

impl ReportService {
    pub fn new(dashboard: DashboardService) -> Self {
        Self { dashboard }
    }

    /// Runs the fan-out for the period and serializes the report text. The
    /// literal date strings of the period end up in the document header.
    pub async fn generate(
        &self,
        session: &Session,
        vehicles: Vec<Vehicle>,
        period: DateRange,
    ) -> Result<String, ReportError> {
        let from = parse_day_start(&period.from)?;
        let to = parse_day_start(&period.to)?;

        let dashboard = self.dashboard.load_fleet(session, vehicles, from, to).await?;
        Ok(FleetReport::build(&dashboard.units, period).render())
    }
}

/// Unix timestamp of UTC midnight for a YYYY-MM-DD date string.
pub fn parse_day_start(value: &str) -> Result<i64, ReportError> {
    let date =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| ReportError::InvalidDate {
            value: value.to_string(),
            source,
        })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_start() {
        assert_eq!(parse_day_start("1970-01-01").unwrap(), 0);
        assert_eq!(parse_day_start("2024-12-01").unwrap(), 1_733_011_200);
    }

    #[test]
    fn test_parse_day_start_rejects_garbage() {
        let err = parse_day_start("01/12/2024").unwrap_err();
        assert!(matches!(err, ReportError::InvalidDate { .. }));
    }
}
