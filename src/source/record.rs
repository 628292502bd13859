//! Wire format for intake files and channels.
//!
//! Blood pressure may arrive either as split numerics or as a combined
//! `"S/D"` text field. Split numerics take precedence when both are present.

use serde::{Deserialize, Serialize};

use crate::data::{parse_blood_pressure, Metric, ReadingSet};
use crate::error::Result;

/// One intake record, as written by a device bridge or by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic_bp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic_bp: Option<f64>,

    /// Combined blood pressure text, e.g. `"120/80"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
}

impl IntakeRecord {
    /// Convert into a reading set, splitting combined blood pressure text.
    ///
    /// Fails only if the blood pressure text is malformed; absent fields are
    /// simply absent from the result.
    pub fn into_readings(self) -> Result<ReadingSet> {
        let mut systolic = self.systolic_bp;
        let mut diastolic = self.diastolic_bp;

        if let Some(text) = self.blood_pressure.as_deref() {
            let (s, d) = parse_blood_pressure(text)?;
            systolic = systolic.or(Some(s));
            diastolic = diastolic.or(Some(d));
        }

        let fields = [
            (Metric::HeartRate, self.heart_rate),
            (Metric::SystolicBp, systolic),
            (Metric::DiastolicBp, diastolic),
            (Metric::Weight, self.weight),
            (Metric::SleepHours, self.sleep_hours),
            (Metric::Steps, self.steps),
        ];

        let mut readings = ReadingSet::new();
        for (metric, value) in fields {
            if let Some(value) = value {
                readings.insert(metric, value);
            }
        }
        Ok(readings)
    }
}

impl From<&ReadingSet> for IntakeRecord {
    fn from(readings: &ReadingSet) -> Self {
        Self {
            heart_rate: readings.get(Metric::HeartRate),
            systolic_bp: readings.get(Metric::SystolicBp),
            diastolic_bp: readings.get(Metric::DiastolicBp),
            blood_pressure: None,
            weight: readings.get(Metric::Weight),
            sleep_hours: readings.get(Metric::SleepHours),
            steps: readings.get(Metric::Steps),
        }
    }
}
