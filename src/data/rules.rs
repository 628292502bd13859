//! Threshold rule table and the rule evaluator.
//!
//! Rules are independent: no rule's firing affects another's applicability.
//! [`evaluate`] walks [`RULES`] in declaration order and appends the messages
//! of every rule whose predicate holds, so the output is a pure function of
//! the readings.

use std::collections::BTreeMap;

use serde::Serialize;

use super::reading::{Metric, ReadingSet, Vitals};
use crate::error::Result;

/// Shown instead of an empty alert list when no alert rule fired.
pub const ALL_NORMAL_MESSAGE: &str = "All health metrics are within a good range!";

/// Shown when no condition-specific nutrition rule fired.
pub const OPTIMAL_MESSAGE: &str = "Your nutrition and activity levels are optimal!";

/// Health status for a metric or the reading set as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }
}

/// Which output list a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Alert,
    Nutrition,
}

/// A fixed predicate over the readings paired with advisory messages.
#[derive(Debug)]
pub struct AdviceRule {
    pub id: &'static str,
    pub category: Category,
    /// Severity of the flag raised on `metrics` when an alert rule fires.
    pub severity: HealthStatus,
    /// Metrics the predicate reads. Empty for unconditional rules.
    pub metrics: &'static [Metric],
    pub predicate: fn(&Vitals) -> bool,
    pub messages: &'static [&'static str],
}

impl AdviceRule {
    pub fn applies(&self, vitals: &Vitals) -> bool {
        (self.predicate)(vitals)
    }

    /// Whether the rule fires regardless of the readings.
    pub fn is_unconditional(&self) -> bool {
        self.metrics.is_empty()
    }
}

fn high_heart_rate(v: &Vitals) -> bool {
    v.heart_rate > 100.0
}

fn high_blood_pressure(v: &Vitals) -> bool {
    v.systolic_bp > 130.0 || v.diastolic_bp > 90.0
}

fn high_weight(v: &Vitals) -> bool {
    v.weight > 100.0
}

fn short_sleep(v: &Vitals) -> bool {
    v.sleep_hours < 6.0
}

fn low_activity(v: &Vitals) -> bool {
    v.steps < 5000.0
}

fn always(_: &Vitals) -> bool {
    true
}

const BLOOD_PRESSURE: &[Metric] = &[Metric::SystolicBp, Metric::DiastolicBp];

/// The canonical rule table, in evaluation order.
pub static RULES: &[AdviceRule] = &[
    AdviceRule {
        id: "alert.heart_rate",
        category: Category::Alert,
        severity: HealthStatus::Critical,
        metrics: &[Metric::HeartRate],
        predicate: high_heart_rate,
        messages: &["High heart rate detected! Consider resting."],
    },
    AdviceRule {
        id: "alert.blood_pressure",
        category: Category::Alert,
        severity: HealthStatus::Warning,
        metrics: BLOOD_PRESSURE,
        predicate: high_blood_pressure,
        messages: &["High blood pressure detected! Consider consulting a doctor."],
    },
    AdviceRule {
        id: "alert.weight",
        category: Category::Alert,
        severity: HealthStatus::Warning,
        metrics: &[Metric::Weight],
        predicate: high_weight,
        messages: &["Weight is above recommended levels. Consider monitoring diet."],
    },
    AdviceRule {
        id: "alert.sleep",
        category: Category::Alert,
        severity: HealthStatus::Warning,
        metrics: &[Metric::SleepHours],
        predicate: short_sleep,
        messages: &["You are not getting enough sleep. Try improving sleep habits."],
    },
    AdviceRule {
        id: "alert.activity",
        category: Category::Alert,
        severity: HealthStatus::Warning,
        metrics: &[Metric::Steps],
        predicate: low_activity,
        messages: &["Low activity detected. Try to walk more for better health."],
    },
    AdviceRule {
        id: "nutrition.weight",
        category: Category::Nutrition,
        severity: HealthStatus::Warning,
        metrics: &[Metric::Weight],
        predicate: high_weight,
        messages: &[
            "Increase Fiber Intake: High-fiber foods like vegetables, beans, and whole grains help keep you full for longer, reducing unnecessary snacking and aiding in weight loss.",
            "Reduce Sugar & Processed Foods: Processed foods contain unhealthy fats and sugars that contribute to weight gain. Replace sugary drinks with water or herbal tea.",
            "Prioritize Lean Proteins: Proteins like chicken, turkey, fish, and tofu promote muscle growth and increase metabolism, aiding weight management.",
            "Eat Healthy Fats: Avocados, nuts, and olive oil provide essential fatty acids that support brain function while keeping hunger in check.",
        ],
    },
    AdviceRule {
        id: "nutrition.heart_rate",
        category: Category::Nutrition,
        severity: HealthStatus::Warning,
        metrics: &[Metric::HeartRate],
        predicate: high_heart_rate,
        messages: &[
            "Eat Magnesium-Rich Foods: Nuts, seeds, and leafy greens help regulate heart rate and reduce stress on the cardiovascular system.",
            "Limit Caffeine & Alcohol: Stimulants can elevate heart rate. Swap coffee with green tea, which contains antioxidants that support heart health.",
            "Consume Omega-3 Fatty Acids: Fatty fish (salmon, mackerel) and flaxseeds help maintain normal heart function and reduce inflammation.",
        ],
    },
    AdviceRule {
        id: "nutrition.blood_pressure",
        category: Category::Nutrition,
        severity: HealthStatus::Warning,
        metrics: BLOOD_PRESSURE,
        predicate: high_blood_pressure,
        messages: &[
            "Increase Potassium Intake: Bananas, oranges, potatoes, and spinach help balance sodium levels, reducing blood pressure.",
            "Reduce Sodium (Salt) Consumption: Too much salt can raise blood pressure. Choose fresh foods and avoid processed meals high in sodium.",
            "Eat More Healthy Fats: Olive oil, nuts, and seeds contain monounsaturated fats that support healthy blood pressure levels.",
            "Incorporate More Antioxidants: Berries, carrots, and dark chocolate help relax blood vessels and improve circulation.",
        ],
    },
    AdviceRule {
        id: "nutrition.sleep",
        category: Category::Nutrition,
        severity: HealthStatus::Warning,
        metrics: &[Metric::SleepHours],
        predicate: short_sleep,
        messages: &[
            "Consume Magnesium & Melatonin-Rich Foods: Almonds, walnuts, and cherries promote better sleep quality.",
            "Drink Herbal Teas: Chamomile tea and valerian root tea help calm the nervous system, making it easier to fall asleep.",
            "Eat More Tryptophan-Rich Foods: Turkey, eggs, and dairy contain tryptophan, an amino acid that boosts serotonin, helping regulate sleep patterns.",
        ],
    },
    AdviceRule {
        id: "nutrition.activity",
        category: Category::Nutrition,
        severity: HealthStatus::Warning,
        metrics: &[Metric::Steps],
        predicate: low_activity,
        messages: &[
            "Increase Protein Intake: Lean proteins (chicken, fish, tofu) help maintain muscle strength and support recovery after physical activity.",
            "Stay Hydrated: Drinking enough water keeps your body energized and prevents fatigue, encouraging more movement.",
            "Eat More Complex Carbs: Sweet potatoes, quinoa, and oats provide sustained energy, making it easier to stay active.",
        ],
    },
    AdviceRule {
        id: "nutrition.general",
        category: Category::Nutrition,
        severity: HealthStatus::Healthy,
        metrics: &[],
        predicate: always,
        messages: &[
            "Eat a Rainbow: A variety of colorful fruits and vegetables provide essential vitamins and antioxidants that strengthen the immune system.",
            "Drink Plenty of Water: Staying hydrated supports digestion, metabolism, and overall well-being.",
            "Include Probiotics in Your Diet: Yogurt, kefir, and fermented foods improve gut health, which is linked to better immunity and digestion.",
            "Consume Iron-Rich Foods: Spinach, lentils, and red meat help prevent fatigue and improve oxygen circulation in the body.",
        ],
    },
];

/// Look up a rule by id.
pub fn rule(id: &str) -> Option<&'static AdviceRule> {
    RULES.iter().find(|r| r.id == id)
}

/// Whether any alert fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    AllNormal,
    Attention,
}

/// Whether any condition-specific nutrition advice fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionStatus {
    Optimal,
    Tailored,
}

/// Ordered alert and advice messages produced by [`evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceResult {
    pub alerts: Vec<String>,
    pub advice: Vec<String>,
    /// Worst severity of the fired alert rules, per metric they read.
    #[serde(skip)]
    pub flags: BTreeMap<Metric, HealthStatus>,
    /// Ids of the fired rules, in table order.
    #[serde(skip)]
    pub fired: Vec<&'static str>,
}

impl AdviceResult {
    pub fn alert_status(&self) -> AlertStatus {
        if self.alerts.is_empty() {
            AlertStatus::AllNormal
        } else {
            AlertStatus::Attention
        }
    }

    pub fn nutrition_status(&self) -> NutritionStatus {
        let tailored = self
            .fired
            .iter()
            .filter_map(|id| rule(id))
            .any(|r| r.category == Category::Nutrition && !r.is_unconditional());
        if tailored {
            NutritionStatus::Tailored
        } else {
            NutritionStatus::Optimal
        }
    }

    /// Alerts, or the all-normal sentinel when there are none.
    pub fn alert_lines(&self) -> Vec<&str> {
        match self.alert_status() {
            AlertStatus::AllNormal => vec![ALL_NORMAL_MESSAGE],
            AlertStatus::Attention => self.alerts.iter().map(String::as_str).collect(),
        }
    }

    pub fn status_of(&self, metric: Metric) -> HealthStatus {
        self.flags.get(&metric).copied().unwrap_or(HealthStatus::Healthy)
    }

    /// Worst status across all metrics.
    pub fn overall(&self) -> HealthStatus {
        self.flags.values().copied().max().unwrap_or(HealthStatus::Healthy)
    }

    /// Fired rules that read the given metric.
    pub fn rules_for(&self, metric: Metric) -> impl Iterator<Item = &'static AdviceRule> + '_ {
        self.fired.iter().filter_map(|id| rule(id)).filter(move |r| r.metrics.contains(&metric))
    }
}

/// Evaluate the rule table against a complete set of vitals.
pub fn evaluate_vitals(vitals: &Vitals) -> AdviceResult {
    let mut result = AdviceResult {
        alerts: Vec::new(),
        advice: Vec::new(),
        flags: BTreeMap::new(),
        fired: Vec::new(),
    };

    for rule in RULES.iter().filter(|r| r.applies(vitals)) {
        let messages = rule.messages.iter().map(|m| m.to_string());
        match rule.category {
            Category::Alert => {
                result.alerts.extend(messages);
                for metric in rule.metrics {
                    let flag = result.flags.entry(*metric).or_insert(rule.severity);
                    *flag = (*flag).max(rule.severity);
                }
            }
            Category::Nutrition => result.advice.extend(messages),
        }
        result.fired.push(rule.id);
    }

    result
}

/// Evaluate the rule table against a reading set.
///
/// All six readings must be present; a missing one fails the whole call with
/// [`Error::MissingReading`](crate::Error::MissingReading). Values outside
/// plausible ranges are evaluated as-is.
pub fn evaluate(readings: &ReadingSet) -> Result<AdviceResult> {
    let vitals = Vitals::try_from(readings)?;
    let result = evaluate_vitals(&vitals);
    tracing::debug!(
        alerts = result.alerts.len(),
        advice = result.advice.len(),
        "evaluated readings"
    );
    Ok(result)
}
