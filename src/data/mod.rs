//! Data models, rule evaluation and statistics for health readings.
//!
//! ## Submodules
//!
//! - [`reading`]: Metrics, readings and reading sets
//! - [`intake`]: Plausible ranges, clamping and out-of-range warnings
//! - [`rules`]: The threshold rule table and [`evaluate`]
//! - [`evaluation`]: Evaluated readings ready for display ([`Evaluation`])
//! - [`series`]: Time-ordered series and seedable sample generators
//! - [`summary`]: Means and weight change over a series
//! - [`trend`]: Sparklines and day-over-day changes
//! - [`export`]: CSV row export and re-import
//! - [`report`]: JSON report combining advice and summary
//!
//! ## Data Flow
//!
//! ```text
//! IntakeRecord (raw JSON) / manual edits
//!        │
//!        ▼
//!    ReadingSet ──▶ IntakeRanges::check() ──▶ OutOfRangeWarning (logged)
//!        │
//!        ▼
//! Evaluation::from_readings()
//!        │
//!        ├──▶ AdviceResult (alerts, advice, per-metric flags)
//!        │
//!        └──▶ Series::extend_with() ──▶ Summary / trend / export rows
//! ```

pub mod evaluation;
pub mod export;
pub mod intake;
pub mod reading;
pub mod report;
pub mod rules;
pub mod series;
pub mod summary;
pub mod trend;

pub use evaluation::Evaluation;
pub use export::{ExportError, ExportRow};
pub use intake::{IntakeRanges, MetricRange, OutOfRangeWarning};
pub use reading::{parse_blood_pressure, Metric, Reading, ReadingSet, Vitals};
pub use report::Report;
pub use rules::{
    evaluate, AdviceResult, AdviceRule, AlertStatus, Category, HealthStatus, NutritionStatus,
    ALL_NORMAL_MESSAGE, OPTIMAL_MESSAGE, RULES,
};
pub use series::{MonthlyPattern, RandomWeek, SampleGenerator, Series, SeriesEntry};
pub use summary::{Summary, SummaryReport};
