//! Application state and navigation logic.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use crate::data::{
    export, Evaluation, Metric, MonthlyPattern, RandomWeek, ReadingSet, Report, SampleGenerator,
    Series, Summary,
};
use crate::settings::Settings;
use crate::source::IntakeSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Metric detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Current readings, trends and alerts.
    Dashboard,
    /// Nutrition advice derived from the readings.
    Nutrition,
    /// Series summary and per-day breakdown.
    Report,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Nutrition,
            View::Nutrition => View::Report,
            View::Report => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::Report,
            View::Nutrition => View::Dashboard,
            View::Report => View::Nutrition,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Nutrition => "Nutrition",
            View::Report => "Report",
        }
    }
}

/// Which synthetic series backs the trend and report views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Seeded random week ending at the current readings.
    RandomWeek { seed: u64 },
    /// Deterministic 30-day pattern.
    Monthly,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Intake
    source: Box<dyn IntakeSource>,
    pub readings: ReadingSet,
    pub data: Option<Evaluation>,
    pub load_error: Option<String>,
    pub settings: Settings,

    // Series
    pub sample: SampleKind,
    /// Readings recorded by the user, appended after the sample.
    pub recorded: Vec<ReadingSet>,
    pub series: Series,

    // Navigation state
    pub selected_metric_index: usize,
    pub selected_advice_index: usize,
    pub selected_entry_index: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create a new App with the given intake source and settings.
    pub fn new(source: Box<dyn IntakeSource>, settings: Settings) -> Self {
        Self::with_theme(source, settings, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn IntakeSource>, settings: Settings, theme: Theme) -> Self {
        let readings: ReadingSet = settings.ranges.defaults().into();
        let sample = if settings.monthly {
            SampleKind::Monthly
        } else {
            SampleKind::RandomWeek {
                seed: settings.seed,
            }
        };

        let mut app = Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            show_detail_overlay: false,
            source,
            readings,
            data: None,
            load_error: None,
            settings,
            sample,
            recorded: Vec::new(),
            series: Series::new(),
            selected_metric_index: 0,
            selected_advice_index: 0,
            selected_entry_index: 0,
            theme,
            status_message: None,
        };
        app.reevaluate();
        app
    }

    /// Returns a description of the intake source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the intake source for new readings.
    ///
    /// Returns Ok(true) if new readings were received, Ok(false) if not.
    /// A polled set replaces the current readings, so a field the source
    /// leaves out is reported as missing. Source errors are kept in
    /// `load_error` for the status bar.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(readings) = self.source.poll() {
            self.readings = readings;
            self.reevaluate();
            return Ok(true);
        }

        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        Ok(false)
    }

    /// Re-run evaluation and rebuild the series from the current readings.
    ///
    /// Evaluation is all-or-nothing: on error the previous result is dropped
    /// and the message is kept for display.
    pub fn reevaluate(&mut self) {
        match Evaluation::from_readings(&self.readings, &self.settings.ranges) {
            Ok(evaluation) => {
                self.data = Some(evaluation);
                self.load_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "evaluation failed");
                self.data = None;
                self.load_error = Some(e.to_string());
            }
        }
        self.rebuild_series();
    }

    fn rebuild_series(&mut self) {
        let mut series = match self.sample {
            SampleKind::Monthly => MonthlyPattern::default().generate(),
            SampleKind::RandomWeek { seed } => {
                let current = self
                    .data
                    .as_ref()
                    .map(|d| d.vitals)
                    .unwrap_or_else(|| self.settings.ranges.defaults());
                RandomWeek::new(seed, current).generate()
            }
        };

        let fallback = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
        for readings in &self.recorded {
            series.extend_with(readings.clone(), fallback);
        }

        self.series = series;
        self.selected_entry_index =
            self.selected_entry_index.min(self.series.len().saturating_sub(1));
    }

    /// Summary of the current series, if it has any entries.
    pub fn summary(&self) -> Option<Summary> {
        Summary::from_series(&self.series).ok()
    }

    /// The metric highlighted on the Dashboard.
    pub fn selected_metric(&self) -> Metric {
        Metric::ALL[self.selected_metric_index.min(Metric::ALL.len() - 1)]
    }

    /// Step the selected metric up or down within its intake range.
    pub fn adjust_selected(&mut self, increase: bool) {
        let metric = self.selected_metric();
        let ranges = &self.settings.ranges;
        let current = self.readings.get(metric).unwrap_or(ranges.range(metric).default);
        let value = if increase {
            ranges.step_up(metric, current)
        } else {
            ranges.step_down(metric, current)
        };
        self.readings.insert(metric, value);
        self.reevaluate();
    }

    /// Restore every reading to its default value.
    pub fn reset_readings(&mut self) {
        self.readings = self.settings.ranges.defaults().into();
        self.reevaluate();
        self.set_status_message("Readings reset to defaults".to_string());
    }

    /// Draw a new random week with the next seed.
    pub fn next_sample(&mut self) {
        let seed = match self.sample {
            SampleKind::RandomWeek { seed } => seed.wrapping_add(1),
            SampleKind::Monthly => self.settings.seed,
        };
        self.sample = SampleKind::RandomWeek { seed };
        self.rebuild_series();
        self.set_status_message(format!("Random week, seed {}", seed));
    }

    /// Switch between the random week and the monthly pattern.
    pub fn toggle_sample_kind(&mut self) {
        self.sample = match self.sample {
            SampleKind::RandomWeek { .. } => SampleKind::Monthly,
            SampleKind::Monthly => SampleKind::RandomWeek {
                seed: self.settings.seed,
            },
        };
        self.rebuild_series();
    }

    /// Describe the series source for titles.
    pub fn sample_description(&self) -> String {
        let base = match self.sample {
            SampleKind::RandomWeek { seed } => {
                RandomWeek::new(seed, self.settings.ranges.defaults()).description()
            }
            SampleKind::Monthly => MonthlyPattern::default().description(),
        };
        if self.recorded.is_empty() {
            base
        } else {
            format!("{} + {} recorded", base, self.recorded.len())
        }
    }

    /// Append the current readings to the series as the next day.
    pub fn record_readings(&mut self) {
        if self.data.is_none() {
            self.set_status_message("Cannot record incomplete readings".to_string());
            return;
        }
        self.recorded.push(self.readings.clone());
        self.rebuild_series();
        let date = self.series.last().map(|e| e.date.to_string()).unwrap_or_default();
        self.set_status_message(format!("Recorded readings for {}", date));
    }

    /// Switch to the next view (cycles Dashboard → Nutrition → Report).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    fn item_count(&self) -> usize {
        match self.current_view {
            View::Dashboard => Metric::ALL.len(),
            View::Nutrition => self.data.as_ref().map_or(0, |d| d.result.advice.len()),
            View::Report => self.series.len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.current_view {
            View::Dashboard => &mut self.selected_metric_index,
            View::Nutrition => &mut self.selected_advice_index,
            View::Report => &mut self.selected_entry_index,
        }
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.item_count().saturating_sub(1);
        let selection = self.selection_mut();
        *selection = (*selection + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        let selection = self.selection_mut();
        *selection = selection.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        *self.selection_mut() = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        let last = self.item_count().saturating_sub(1);
        *self.selection_mut() = last;
    }

    /// Open the detail overlay for the selected metric.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Dashboard {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to the Dashboard.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if self.current_view != View::Dashboard {
            self.current_view = View::Dashboard;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current series as CSV rows.
    pub fn export_rows(&self, path: &Path) -> Result<usize> {
        Ok(export::export_series(&self.series, path)?)
    }

    /// Export alerts, advice and summary as a JSON report.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!(
                "No evaluation to export: {}",
                self.load_error.as_deref().unwrap_or("no readings")
            );
        };
        Report::build(data, &self.series)?.write_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HealthStatus;
    use crate::source::{ChannelSource, ManualSource};
    use tempfile::NamedTempFile;

    fn test_app() -> App {
        let settings = Settings::default();
        let source = ManualSource::new(settings.ranges.defaults().into());
        App::with_theme(Box::new(source), settings, Theme::dark())
    }

    #[test]
    fn new_app_evaluates_defaults() {
        let app = test_app();
        let data = app.data.as_ref().unwrap();
        assert!(data.result.alerts.is_empty());
        assert_eq!(data.result.advice.len(), 4);
        assert_eq!(app.series.len(), RandomWeek::DAYS);
        assert_eq!(app.source_description(), "manual entry");
    }

    #[test]
    fn adjusting_heart_rate_past_threshold_raises_alert() {
        let mut app = test_app();
        app.readings.insert(Metric::HeartRate, 100.0);
        app.reevaluate();
        assert!(app.data.as_ref().unwrap().result.alerts.is_empty());

        app.selected_metric_index = 0;
        app.adjust_selected(true);

        let data = app.data.as_ref().unwrap();
        assert_eq!(data.vitals.heart_rate, 101.0);
        assert_eq!(data.status_of(Metric::HeartRate), HealthStatus::Critical);
        // The random week ends at the edited readings
        assert_eq!(
            app.series.last().unwrap().readings.get(Metric::HeartRate),
            Some(101.0)
        );
    }

    #[test]
    fn adjusting_clamps_to_range() {
        let mut app = test_app();
        app.selected_metric_index = Metric::ALL.iter().position(|m| *m == Metric::SleepHours).unwrap();
        for _ in 0..40 {
            app.adjust_selected(false);
        }
        assert_eq!(app.readings.get(Metric::SleepHours), Some(0.0));
    }

    #[test]
    fn channel_update_replaces_readings() {
        let settings = Settings::default();
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::with_theme(Box::new(source), settings.clone(), Theme::dark());

        let full: ReadingSet = settings.ranges.defaults().into();
        tx.send(full.with(Metric::Steps, 3000.0)).unwrap();
        assert!(app.reload_data().unwrap());

        let data = app.data.as_ref().unwrap();
        assert_eq!(data.vitals.steps, 3000.0);
        assert_eq!(data.result.alerts.len(), 1);
        assert!(!app.reload_data().unwrap());

        tx.send(ReadingSet::new().with(Metric::Steps, 3000.0)).unwrap();
        assert!(app.reload_data().unwrap());
        assert!(app.data.is_none());
        assert_eq!(app.load_error.as_deref(), Some("missing reading: heart_rate"));
        assert_eq!(app.readings.get(Metric::Weight), None);
    }

    #[test]
    fn file_without_weight_is_missing_a_reading() {
        use std::io::Write;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"heart_rate":120,"blood_pressure":"120/80","sleep_hours":7,"steps":10000}}"#
        )
        .unwrap();

        let source = crate::source::FileSource::new(file.path());
        let mut app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        assert!(app.reload_data().unwrap());

        assert!(app.data.is_none());
        assert_eq!(app.load_error.as_deref(), Some("missing reading: weight"));
        assert_eq!(app.readings.missing(), vec![Metric::Weight]);
        assert_eq!(app.readings.get(Metric::HeartRate), Some(120.0));
    }

    #[test]
    fn missing_reading_clears_evaluation() {
        let mut app = test_app();
        app.readings = ReadingSet::new().with(Metric::HeartRate, 80.0);
        app.reevaluate();
        assert!(app.data.is_none());
        assert_eq!(app.load_error.as_deref(), Some("missing reading: systolic_bp"));
    }

    #[test]
    fn view_cycling() {
        let mut app = test_app();
        app.next_view();
        assert_eq!(app.current_view, View::Nutrition);
        app.next_view();
        app.next_view();
        assert_eq!(app.current_view, View::Dashboard);
        app.prev_view();
        assert_eq!(app.current_view, View::Report);
        app.go_back();
        assert_eq!(app.current_view, View::Dashboard);
    }

    #[test]
    fn selection_is_per_view_and_bounded() {
        let mut app = test_app();
        app.select_next_n(100);
        assert_eq!(app.selected_metric_index, Metric::ALL.len() - 1);

        app.set_view(View::Nutrition);
        app.select_last();
        assert_eq!(app.selected_advice_index, 3);
        app.select_prev_n(10);
        assert_eq!(app.selected_advice_index, 0);
        assert_eq!(app.selected_metric_index, Metric::ALL.len() - 1);
    }

    #[test]
    fn detail_overlay_only_on_dashboard() {
        let mut app = test_app();
        app.set_view(View::Report);
        app.enter_detail();
        assert!(!app.show_detail_overlay);

        app.set_view(View::Dashboard);
        app.enter_detail();
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn sample_switching() {
        let mut app = test_app();
        app.toggle_sample_kind();
        assert_eq!(app.sample, SampleKind::Monthly);
        assert_eq!(app.series.len(), 30);

        app.next_sample();
        assert_eq!(app.sample, SampleKind::RandomWeek { seed: 42 });
        app.next_sample();
        assert_eq!(app.sample, SampleKind::RandomWeek { seed: 43 });
    }

    #[test]
    fn recorded_readings_extend_series() {
        let mut app = test_app();
        app.record_readings();
        assert_eq!(app.series.len(), RandomWeek::DAYS + 1);
        assert_eq!(
            app.series.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()
        );
        assert!(app.sample_description().ends_with("+ 1 recorded"));
    }

    #[test]
    fn export_rows_and_report() {
        let app = test_app();

        let rows_file = NamedTempFile::new().unwrap();
        assert_eq!(app.export_rows(rows_file.path()).unwrap(), RandomWeek::DAYS);

        let report_file = NamedTempFile::new().unwrap();
        app.export_report(report_file.path()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report_file.path()).unwrap()).unwrap();
        assert_eq!(json["alert_status"], "all_normal");
    }

    #[test]
    fn status_message_expires() {
        let mut app = test_app();
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));

        app.status_message = Some((
            "old".to_string(),
            std::time::Instant::now() - std::time::Duration::from_secs(5),
        ));
        assert!(app.get_status_message().is_none());
    }
}
