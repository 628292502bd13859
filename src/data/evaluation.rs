//! Evaluated readings ready for display.
//!
//! This module ties intake and the rule evaluator together: a reading set
//! is checked against the intake ranges, then evaluated in full.

use std::time::Instant;

use super::intake::{IntakeRanges, OutOfRangeWarning};
use super::reading::{Metric, ReadingSet, Vitals};
use super::rules::{evaluate, AdviceResult, HealthStatus};

/// A complete reading set with its advice and range warnings.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub vitals: Vitals,
    pub result: AdviceResult,
    pub warnings: Vec<OutOfRangeWarning>,
    pub last_updated: Instant,
}

impl Evaluation {
    /// Evaluate a reading set.
    ///
    /// Out-of-range values only produce warnings; a missing reading fails
    /// the whole evaluation.
    pub fn from_readings(readings: &ReadingSet, ranges: &IntakeRanges) -> crate::Result<Self> {
        let result = evaluate(readings)?;
        let vitals = Vitals::try_from(readings)?;
        let warnings = ranges.check(readings);

        Ok(Self {
            vitals,
            result,
            warnings,
            last_updated: Instant::now(),
        })
    }

    pub fn readings(&self) -> ReadingSet {
        self.vitals.into()
    }

    pub fn status_of(&self, metric: Metric) -> HealthStatus {
        self.result.status_of(metric)
    }

    pub fn warning_for(&self, metric: Metric) -> Option<&OutOfRangeWarning> {
        self.warnings.iter().find(|w| w.metric == metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::IntakeRecord;

    fn from_json(json: &str) -> Evaluation {
        let record: IntakeRecord = serde_json::from_str(json).unwrap();
        Evaluation::from_readings(&record.into_readings().unwrap(), &IntakeRanges::default())
            .unwrap()
    }

    #[test]
    fn parse_split_blood_pressure() {
        let json = r#"{
            "heart_rate": 105,
            "systolic_bp": 120,
            "diastolic_bp": 80,
            "weight": 70,
            "sleep_hours": 7,
            "steps": 10000
        }"#;
        let eval = from_json(json);
        assert_eq!(eval.result.alerts.len(), 1);
        assert_eq!(eval.status_of(Metric::HeartRate), HealthStatus::Critical);
        assert!(eval.warnings.is_empty());
    }

    #[test]
    fn parse_combined_blood_pressure() {
        let json = r#"{
            "heart_rate": 75,
            "blood_pressure": "140/95",
            "weight": 70,
            "sleep_hours": 7,
            "steps": 10000
        }"#;
        let eval = from_json(json);
        assert_eq!(eval.vitals.systolic_bp, 140.0);
        assert_eq!(eval.vitals.diastolic_bp, 95.0);
        assert_eq!(
            eval.result.alerts,
            vec!["High blood pressure detected! Consider consulting a doctor."]
        );
    }

    #[test]
    fn result_matches_rule_evaluation() {
        let readings: ReadingSet = IntakeRanges::default().defaults().into();
        let eval = Evaluation::from_readings(&readings, &IntakeRanges::default()).unwrap();
        let expected = evaluate(&readings).unwrap();
        assert_eq!(eval.result.alerts, expected.alerts);
        assert_eq!(eval.result.advice, expected.advice);
    }

    #[test]
    fn missing_reading_is_an_error() {
        let readings = ReadingSet::new().with(Metric::HeartRate, 75.0);
        let err = Evaluation::from_readings(&readings, &IntakeRanges::default()).unwrap_err();
        assert_eq!(err, Error::MissingReading(Metric::SystolicBp));
    }

    #[test]
    fn out_of_range_values_warn_but_evaluate() {
        let mut readings: ReadingSet = IntakeRanges::default().defaults().into();
        readings.insert(Metric::Steps, -10.0);

        let eval = Evaluation::from_readings(&readings, &IntakeRanges::default()).unwrap();
        assert!(eval.warning_for(Metric::Steps).is_some());
        assert_eq!(eval.status_of(Metric::Steps), HealthStatus::Warning);
        assert_eq!(eval.vitals.steps, -10.0);
    }
}
