//! Plausible-range handling for metrics intake.
//!
//! Manual edits are clamped into each metric's range. Values arriving from
//! other sources are never altered; they produce [`OutOfRangeWarning`]s that
//! are logged and shown, and the value is still evaluated.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::reading::{Metric, ReadingSet, Vitals};

/// Range, default value and edit step for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max,
            default,
            step,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Intake ranges for all six metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeRanges {
    pub heart_rate: MetricRange,
    pub systolic_bp: MetricRange,
    pub diastolic_bp: MetricRange,
    pub weight: MetricRange,
    pub sleep_hours: MetricRange,
    pub steps: MetricRange,
}

impl Default for IntakeRanges {
    fn default() -> Self {
        Self {
            heart_rate: MetricRange::new(30.0, 200.0, 75.0, 1.0),
            systolic_bp: MetricRange::new(50.0, 200.0, 120.0, 1.0),
            diastolic_bp: MetricRange::new(30.0, 130.0, 80.0, 1.0),
            weight: MetricRange::new(30.0, 200.0, 70.0, 0.5),
            sleep_hours: MetricRange::new(0.0, 12.0, 7.0, 0.5),
            steps: MetricRange::new(0.0, 50000.0, 10000.0, 500.0),
        }
    }
}

impl IntakeRanges {
    pub fn range(&self, metric: Metric) -> &MetricRange {
        match metric {
            Metric::HeartRate => &self.heart_rate,
            Metric::SystolicBp => &self.systolic_bp,
            Metric::DiastolicBp => &self.diastolic_bp,
            Metric::Weight => &self.weight,
            Metric::SleepHours => &self.sleep_hours,
            Metric::Steps => &self.steps,
        }
    }

    /// Reading set holding every metric's default value.
    pub fn defaults(&self) -> Vitals {
        Vitals {
            heart_rate: self.heart_rate.default,
            systolic_bp: self.systolic_bp.default,
            diastolic_bp: self.diastolic_bp.default,
            weight: self.weight.default,
            sleep_hours: self.sleep_hours.default,
            steps: self.steps.default,
        }
    }

    pub fn clamp(&self, metric: Metric, value: f64) -> f64 {
        self.range(metric).clamp(value)
    }

    /// Increase a value by the metric's step, staying in range.
    pub fn step_up(&self, metric: Metric, value: f64) -> f64 {
        let range = self.range(metric);
        range.clamp(value + range.step)
    }

    /// Decrease a value by the metric's step, staying in range.
    pub fn step_down(&self, metric: Metric, value: f64) -> f64 {
        let range = self.range(metric);
        range.clamp(value - range.step)
    }

    /// Report values outside their plausible range.
    ///
    /// Each warning is logged; the readings are left untouched.
    pub fn check(&self, readings: &ReadingSet) -> Vec<OutOfRangeWarning> {
        let warnings: Vec<OutOfRangeWarning> = readings
            .readings()
            .filter_map(|reading| {
                let range = self.range(reading.metric);
                (!range.contains(reading.value)).then_some(OutOfRangeWarning {
                    metric: reading.metric,
                    value: reading.value,
                    min: range.min,
                    max: range.max,
                })
            })
            .collect();

        for warning in &warnings {
            tracing::warn!(
                metric = %warning.metric,
                value = warning.value,
                min = warning.min,
                max = warning.max,
                "reading outside plausible range"
            );
        }
        warnings
    }
}

/// A non-fatal notice that a reading lies outside its plausible range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRangeWarning {
    pub metric: Metric,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for OutOfRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the plausible range {}..={}",
            self.metric, self.value, self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_manual_entry_defaults() {
        let vitals = IntakeRanges::default().defaults();
        assert_eq!(vitals.heart_rate, 75.0);
        assert_eq!(vitals.blood_pressure(), "120/80");
        assert_eq!(vitals.weight, 70.0);
        assert_eq!(vitals.sleep_hours, 7.0);
        assert_eq!(vitals.steps, 10000.0);
    }

    #[test]
    fn clamp_keeps_values_in_range() {
        let ranges = IntakeRanges::default();
        assert_eq!(ranges.clamp(Metric::HeartRate, 250.0), 200.0);
        assert_eq!(ranges.clamp(Metric::Weight, 10.0), 30.0);
        assert_eq!(ranges.clamp(Metric::SleepHours, 8.5), 8.5);
    }

    #[test]
    fn steps_respect_bounds() {
        let ranges = IntakeRanges::default();
        assert_eq!(ranges.step_up(Metric::Steps, 10000.0), 10500.0);
        assert_eq!(ranges.step_up(Metric::Steps, 49800.0), 50000.0);
        assert_eq!(ranges.step_down(Metric::SleepHours, 0.25), 0.0);
        assert_eq!(ranges.step_down(Metric::Weight, 70.0), 69.5);
    }

    #[test]
    fn check_reports_but_does_not_alter() {
        let ranges = IntakeRanges::default();
        let readings = ReadingSet::new()
            .with(Metric::Weight, -5.0)
            .with(Metric::HeartRate, 75.0)
            .with(Metric::Steps, 60000.0);

        let warnings = ranges.check(&readings);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].metric, Metric::Weight);
        assert_eq!(warnings[1].metric, Metric::Steps);
        assert_eq!(readings.get(Metric::Weight), Some(-5.0));
        assert!(warnings[0].to_string().contains("weight = -5"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{"steps": {"min": 0, "max": 100000, "default": 8000, "step": 1000}}"#;
        let ranges: IntakeRanges = serde_json::from_str(json).unwrap();
        assert_eq!(ranges.steps.max, 100000.0);
        assert_eq!(ranges.heart_rate, IntakeRanges::default().heart_rate);
    }
}
