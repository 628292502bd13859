//! Descriptive statistics over a reading series.

use std::collections::BTreeMap;

use serde::Serialize;

use super::reading::Metric;
use super::series::Series;
use crate::error::{Error, Result};

/// Means per metric and the first-to-last weight change of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of entries summarised.
    pub entries: usize,
    means: BTreeMap<Metric, f64>,
    weight_delta: Option<f64>,
}

impl Summary {
    /// Summarise a series.
    ///
    /// Each mean covers only the entries carrying that metric; a metric no
    /// entry carries has no mean. Fails with [`Error::NoData`] on an empty
    /// series.
    pub fn from_series(series: &Series) -> Result<Self> {
        if series.is_empty() {
            return Err(Error::NoData);
        }

        let means = Metric::ALL
            .iter()
            .filter_map(|&metric| mean(&series.values(metric)).map(|m| (metric, m)))
            .collect();

        let weights = series.values(Metric::Weight);
        let weight_delta = match (weights.first(), weights.last()) {
            (Some(first), Some(last)) => Some(last - first),
            _ => None,
        };

        Ok(Self {
            entries: series.len(),
            means,
            weight_delta,
        })
    }

    pub fn mean(&self, metric: Metric) -> Option<f64> {
        self.means.get(&metric).copied()
    }

    pub fn weight_delta(&self) -> Option<f64> {
        self.weight_delta
    }

    /// Mean blood pressure as `S/D`, each side truncated to an integer.
    pub fn mean_bp(&self) -> Option<String> {
        let systolic = self.mean(Metric::SystolicBp)?;
        let diastolic = self.mean(Metric::DiastolicBp)?;
        Some(format!("{}/{}", systolic.trunc() as i64, diastolic.trunc() as i64))
    }

    /// The presentation-facing view of this summary.
    pub fn report(&self) -> SummaryReport {
        SummaryReport {
            mean_steps: self.mean(Metric::Steps),
            mean_heart_rate: self.mean(Metric::HeartRate),
            weight_delta: self.weight_delta,
            mean_bp: self.mean_bp(),
            mean_sleep: self.mean(Metric::SleepHours),
        }
    }
}

/// Summary fields as consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub mean_steps: Option<f64>,
    pub mean_heart_rate: Option<f64>,
    pub weight_delta: Option<f64>,
    pub mean_bp: Option<String>,
    pub mean_sleep: Option<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reading::ReadingSet;
    use crate::data::series::{MonthlyPattern, SampleGenerator};
    use chrono::NaiveDate;

    #[test]
    fn empty_series_has_no_data() {
        assert_eq!(Summary::from_series(&Series::new()), Err(Error::NoData));
    }

    #[test]
    fn monthly_pattern_means() {
        let series = MonthlyPattern::default().generate();
        let summary = Summary::from_series(&series).unwrap();

        assert_eq!(summary.entries, 30);
        // The 0..4 cycle averages to 2, so 8000 + 1000 * 2
        assert_eq!(summary.mean(Metric::Steps), Some(10000.0));
        assert_eq!(summary.mean(Metric::SleepHours), Some(7.0));
        assert_eq!(summary.mean_bp().as_deref(), Some("122/81"));

        let delta = summary.weight_delta().unwrap();
        assert!((delta - (-5.8)).abs() < 1e-9);
    }

    #[test]
    fn means_skip_absent_values() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut series = Series::new();
        series.extend_with(ReadingSet::new().with(Metric::Steps, 4000.0), start);
        series.extend_with(ReadingSet::new().with(Metric::Steps, 6000.0).with(Metric::Weight, 90.0), start);
        series.extend_with(ReadingSet::new().with(Metric::Weight, 88.5), start);

        let summary = Summary::from_series(&series).unwrap();
        assert_eq!(summary.mean(Metric::Steps), Some(5000.0));
        assert_eq!(summary.weight_delta(), Some(-1.5));
        assert_eq!(summary.mean(Metric::HeartRate), None);
        assert_eq!(summary.mean_bp(), None);
    }

    #[test]
    fn report_serializes_output_contract() {
        let series = MonthlyPattern::default().generate();
        let report = Summary::from_series(&series).unwrap().report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["mean_steps"], 10000.0);
        assert_eq!(json["mean_bp"], "122/81");
        assert!(json.get("mean_heart_rate").is_some());
        assert!(json.get("mean_sleep").is_some());
    }
}
