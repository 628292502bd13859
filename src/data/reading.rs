//! Health readings and reading sets.
//!
//! A [`ReadingSet`] is whatever an intake source delivered and may be
//! partial. [`Vitals`] is the complete form the rule evaluator works on.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the six tracked health metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    HeartRate,
    SystolicBp,
    DiastolicBp,
    Weight,
    SleepHours,
    Steps,
}

impl Metric {
    /// All metrics in declaration order.
    pub const ALL: [Metric; 6] = [
        Metric::HeartRate,
        Metric::SystolicBp,
        Metric::DiastolicBp,
        Metric::Weight,
        Metric::SleepHours,
        Metric::Steps,
    ];

    /// Machine name, as used in JSON intake files.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::HeartRate => "heart_rate",
            Metric::SystolicBp => "systolic_bp",
            Metric::DiastolicBp => "diastolic_bp",
            Metric::Weight => "weight",
            Metric::SleepHours => "sleep_hours",
            Metric::Steps => "steps",
        }
    }

    /// Human-readable label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate",
            Metric::SystolicBp => "Systolic BP",
            Metric::DiastolicBp => "Diastolic BP",
            Metric::Weight => "Weight",
            Metric::SleepHours => "Sleep",
            Metric::Steps => "Steps",
        }
    }

    /// Unit of measurement.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::HeartRate => "bpm",
            Metric::SystolicBp | Metric::DiastolicBp => "mmHg",
            Metric::Weight => "kg",
            Metric::SleepHours => "hours",
            Metric::Steps => "count",
        }
    }

    /// Format a value of this metric for display.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Metric::Weight | Metric::SleepHours => format!("{:.1}", value),
            _ => format!("{:.0}", value),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named scalar observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub metric: Metric,
    pub value: f64,
}

impl Reading {
    pub fn new(metric: Metric, value: f64) -> Self {
        Self { metric, value }
    }

    pub fn name(&self) -> &'static str {
        self.metric.name()
    }

    pub fn unit(&self) -> &'static str {
        self.metric.unit()
    }
}

/// A possibly partial set of readings keyed by metric.
///
/// Serializes as a JSON object keyed by metric name, e.g.
/// `{"heart_rate": 75, "steps": 10000}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingSet {
    values: BTreeMap<Metric, f64>,
}

impl ReadingSet {
    /// Create an empty reading set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) a reading.
    pub fn insert(&mut self, metric: Metric, value: f64) {
        self.values.insert(metric, value);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.insert(metric, value);
        self
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Get a reading, failing with [`Error::MissingReading`] if absent.
    pub fn require(&self, metric: Metric) -> Result<f64> {
        self.get(metric).ok_or(Error::MissingReading(metric))
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate readings in metric declaration order.
    pub fn readings(&self) -> impl Iterator<Item = Reading> + '_ {
        self.values.iter().map(|(&metric, &value)| Reading::new(metric, value))
    }

    /// Metrics that are not present, in declaration order.
    pub fn missing(&self) -> Vec<Metric> {
        Metric::ALL.iter().copied().filter(|m| !self.contains(*m)).collect()
    }
}

impl FromIterator<Reading> for ReadingSet {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        let mut set = ReadingSet::new();
        for reading in iter {
            set.insert(reading.metric, reading.value);
        }
        set
    }
}

/// A complete set of the six readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub heart_rate: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub weight: f64,
    pub sleep_hours: f64,
    pub steps: f64,
}

impl Vitals {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::HeartRate => self.heart_rate,
            Metric::SystolicBp => self.systolic_bp,
            Metric::DiastolicBp => self.diastolic_bp,
            Metric::Weight => self.weight,
            Metric::SleepHours => self.sleep_hours,
            Metric::Steps => self.steps,
        }
    }

    /// Blood pressure in `S/D` form.
    pub fn blood_pressure(&self) -> String {
        format!("{:.0}/{:.0}", self.systolic_bp, self.diastolic_bp)
    }
}

impl TryFrom<&ReadingSet> for Vitals {
    type Error = Error;

    /// Fails with the first missing metric in declaration order.
    fn try_from(set: &ReadingSet) -> Result<Self> {
        Ok(Self {
            heart_rate: set.require(Metric::HeartRate)?,
            systolic_bp: set.require(Metric::SystolicBp)?,
            diastolic_bp: set.require(Metric::DiastolicBp)?,
            weight: set.require(Metric::Weight)?,
            sleep_hours: set.require(Metric::SleepHours)?,
            steps: set.require(Metric::Steps)?,
        })
    }
}

impl From<Vitals> for ReadingSet {
    fn from(vitals: Vitals) -> Self {
        Metric::ALL.iter().map(|&m| Reading::new(m, vitals.get(m))).collect()
    }
}

/// Split `"120/80"` into `(systolic, diastolic)`.
pub fn parse_blood_pressure(text: &str) -> Result<(f64, f64)> {
    let invalid = || Error::InvalidBloodPressure(text.to_string());

    let (systolic, diastolic) = text.trim().split_once('/').ok_or_else(invalid)?;
    let systolic: f64 = systolic.trim().parse().map_err(|_| invalid())?;
    let diastolic: f64 = diastolic.trim().parse().map_err(|_| invalid())?;

    if !systolic.is_finite() || !diastolic.is_finite() {
        return Err(invalid());
    }
    Ok((systolic, diastolic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set() -> ReadingSet {
        ReadingSet::new()
            .with(Metric::HeartRate, 75.0)
            .with(Metric::SystolicBp, 120.0)
            .with(Metric::DiastolicBp, 80.0)
            .with(Metric::Weight, 70.0)
            .with(Metric::SleepHours, 7.0)
            .with(Metric::Steps, 10000.0)
    }

    #[test]
    fn reading_set_serializes_by_metric_name() {
        let set = ReadingSet::new().with(Metric::HeartRate, 75.0).with(Metric::Steps, 9000.0);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"heart_rate":75.0,"steps":9000.0}"#);

        let parsed: ReadingSet = serde_json::from_str(r#"{"sleep_hours": 6.5}"#).unwrap();
        assert_eq!(parsed.get(Metric::SleepHours), Some(6.5));
    }

    #[test]
    fn vitals_from_complete_set() {
        let vitals = Vitals::try_from(&full_set()).unwrap();
        assert_eq!(vitals.heart_rate, 75.0);
        assert_eq!(vitals.steps, 10000.0);
        assert_eq!(vitals.blood_pressure(), "120/80");
    }

    #[test]
    fn vitals_names_first_missing_metric() {
        let set: ReadingSet = full_set().readings().filter(|r| r.metric != Metric::Weight).collect();

        let err = Vitals::try_from(&set).unwrap_err();
        assert_eq!(err, Error::MissingReading(Metric::Weight));
        assert_eq!(err.to_string(), "missing reading: weight");
        assert_eq!(set.missing(), vec![Metric::Weight]);
    }

    #[test]
    fn vitals_round_trip_through_reading_set() {
        let vitals = Vitals::try_from(&full_set()).unwrap();
        let set = ReadingSet::from(vitals);
        assert_eq!(set, full_set());
    }

    #[test]
    fn reading_exposes_name_and_unit() {
        let reading = Reading::new(Metric::Weight, 82.5);
        assert_eq!(reading.name(), "weight");
        assert_eq!(reading.unit(), "kg");
    }

    #[test]
    fn parse_blood_pressure_splits_values() {
        assert_eq!(parse_blood_pressure("120/80").unwrap(), (120.0, 80.0));
        assert_eq!(parse_blood_pressure(" 135 / 92 ").unwrap(), (135.0, 92.0));
    }

    #[test]
    fn parse_blood_pressure_rejects_malformed_text() {
        for bad in ["120", "120/", "abc/80", "", "120-80"] {
            assert!(matches!(
                parse_blood_pressure(bad),
                Err(Error::InvalidBloodPressure(_))
            ));
        }
    }
}
