//! JSON report export.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::evaluation::Evaluation;
use super::rules::{AlertStatus, NutritionStatus};
use super::series::Series;
use super::summary::{Summary, SummaryReport};

/// Alerts, advice and series summary as handed to presentation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub alerts: Vec<String>,
    pub advice: Vec<String>,
    pub summary: SummaryReport,
    pub alert_status: AlertStatus,
    pub nutrition_status: NutritionStatus,
    pub warnings: Vec<String>,
}

impl Report {
    /// Build a report; fails with `NoData` if the series is empty.
    pub fn build(evaluation: &Evaluation, series: &Series) -> crate::Result<Self> {
        let summary = Summary::from_series(series)?;
        let result = &evaluation.result;

        Ok(Self {
            alerts: result.alerts.clone(),
            advice: result.advice.clone(),
            summary: summary.report(),
            alert_status: result.alert_status(),
            nutrition_status: result.nutrition_status(),
            warnings: evaluation.warnings.iter().map(ToString::to_string).collect(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "exported report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::{MonthlyPattern, SampleGenerator};
    use crate::data::IntakeRanges;
    use crate::error::Error;

    fn evaluation() -> Evaluation {
        let ranges = IntakeRanges::default();
        Evaluation::from_readings(&ranges.defaults().into(), &ranges).unwrap()
    }

    #[test]
    fn report_carries_output_contract() {
        let series = MonthlyPattern::default().generate();
        let report = Report::build(&evaluation(), &series).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["alerts"].as_array().unwrap().len(), 0);
        assert_eq!(json["advice"].as_array().unwrap().len(), 4);
        assert_eq!(json["alert_status"], "all_normal");
        assert_eq!(json["nutrition_status"], "optimal");
        assert_eq!(json["summary"]["mean_bp"], "122/81");
    }

    #[test]
    fn empty_series_fails() {
        let err = Report::build(&evaluation(), &Series::new()).unwrap_err();
        assert_eq!(err, Error::NoData);
    }
}
