//! # healthiq
//!
//! A terminal dashboard and library for personal health metrics.
//!
//! Six readings are tracked (heart rate, systolic and diastolic blood
//! pressure, weight, sleep hours and step count). A static rule table turns
//! the current readings into alerts and nutrition advice, a time series of
//! readings is summarised with simple descriptive statistics, and the series
//! can be exported as spreadsheet rows.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (rules,  │    │(rendering)   │         │ │
//! │  └────┬────┘    │  stats)  │    └─────────┘    └─────────┘ │
//! │       │         └──────────┘                                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── ManualSource | FileSource | ChannelSource  │
//! │  │ (intake)│                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation and manual editing
//! - **[`source`]**: Intake abstraction ([`IntakeSource`] trait) with
//!   manual, file-polling and channel implementations
//! - **[`data`]**: Readings, the rule evaluator, series, statistics and export
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered settings (file + environment)
//!
//! ## Usage
//!
//! ### Evaluating readings
//!
//! ```
//! use healthiq::{evaluate, Metric, ReadingSet};
//!
//! let readings = ReadingSet::new()
//!     .with(Metric::HeartRate, 105.0)
//!     .with(Metric::SystolicBp, 120.0)
//!     .with(Metric::DiastolicBp, 80.0)
//!     .with(Metric::Weight, 70.0)
//!     .with(Metric::SleepHours, 7.0)
//!     .with(Metric::Steps, 10000.0);
//!
//! let result = evaluate(&readings).unwrap();
//! assert_eq!(result.alerts, vec!["High heart rate detected! Consider resting."]);
//! assert_eq!(result.advice.len(), 3 + 4);
//! ```
//!
//! ### Summarising a series
//!
//! ```
//! use healthiq::{Metric, MonthlyPattern, SampleGenerator, Summary};
//!
//! let series = MonthlyPattern::default().generate();
//! let summary = Summary::from_series(&series).unwrap();
//! assert_eq!(summary.mean(Metric::SleepHours), Some(7.0));
//! ```
//!
//! ### Running the TUI with a file source
//!
//! ```
//! use healthiq::{App, FileSource, Settings};
//!
//! let source = Box::new(FileSource::new("readings.json"));
//! let app = App::new(source, Settings::default());
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    evaluate, AdviceResult, Evaluation, HealthStatus, IntakeRanges, Metric, MonthlyPattern,
    RandomWeek, Reading, ReadingSet, Report, SampleGenerator, Series, Summary, Vitals,
};
pub use error::{Error, Result};
pub use settings::Settings;
pub use source::{ChannelSource, FileSource, IntakeRecord, IntakeSource, ManualSource};
