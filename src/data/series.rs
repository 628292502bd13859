//! Time-ordered reading series and sample generators.

use std::collections::VecDeque;

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::reading::{Metric, ReadingSet, Vitals};

/// Maximum number of entries kept in a series.
pub const MAX_SERIES_LEN: usize = 366;

/// Readings observed on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub date: NaiveDate,
    pub readings: ReadingSet,
}

/// A time-ordered sequence of reading sets.
///
/// Entries beyond [`MAX_SERIES_LEN`] drop off the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    entries: VecDeque<SeriesEntry>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: NaiveDate, readings: ReadingSet) {
        self.entries.push_back(SeriesEntry { date, readings });
        if self.entries.len() > MAX_SERIES_LEN {
            self.entries.pop_front();
        }
    }

    /// Append readings dated the day after the last entry.
    ///
    /// An empty series starts at `fallback`.
    pub fn extend_with(&mut self, readings: ReadingSet, fallback: NaiveDate) -> NaiveDate {
        let date = self.next_date().unwrap_or(fallback);
        self.push(date, readings);
        date
    }

    /// Date following the last entry.
    pub fn next_date(&self) -> Option<NaiveDate> {
        self.entries.back().and_then(|e| e.date.checked_add_days(Days::new(1)))
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &SeriesEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&SeriesEntry> {
        self.entries.front()
    }

    pub fn last(&self) -> Option<&SeriesEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values of one metric across the series, skipping entries without it.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.entries.iter().filter_map(|e| e.readings.get(metric)).collect()
    }
}

impl FromIterator<SeriesEntry> for Series {
    fn from_iter<I: IntoIterator<Item = SeriesEntry>>(iter: I) -> Self {
        let mut series = Series::new();
        for entry in iter {
            series.push(entry.date, entry.readings);
        }
        series
    }
}

/// Source of synthetic sample series.
///
/// Implementations must be deterministic for a given construction so that
/// tests can rely on their output.
pub trait SampleGenerator {
    fn generate(&mut self) -> Series;

    /// Short description for the status bar.
    fn description(&self) -> String;
}

/// Deterministic monthly pattern with cyclic variation.
#[derive(Debug, Clone)]
pub struct MonthlyPattern {
    pub start: NaiveDate,
    pub days: usize,
}

impl Default for MonthlyPattern {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            days: 30,
        }
    }
}

impl MonthlyPattern {
    fn entry(&self, i: usize) -> Option<SeriesEntry> {
        let date = self.start.checked_add_days(Days::new(i as u64))?;
        let n = i as f64;
        let vitals = Vitals {
            steps: 8000.0 + 1000.0 * (i % 5) as f64,
            heart_rate: 70.0 + 5.0 * (i % 4) as f64,
            weight: 75.0 - 0.2 * n,
            systolic_bp: 120.0 + (i % 5) as f64,
            diastolic_bp: 80.0 + (i % 3) as f64,
            sleep_hours: 6.0 + (i % 3) as f64,
        };
        Some(SeriesEntry {
            date,
            readings: vitals.into(),
        })
    }
}

impl SampleGenerator for MonthlyPattern {
    fn generate(&mut self) -> Series {
        (0..self.days).filter_map(|i| self.entry(i)).collect()
    }

    fn description(&self) -> String {
        format!("monthly pattern from {} ({} days)", self.start, self.days)
    }
}

/// Seeded week of random heart-rate and step variation ending at the
/// current readings.
#[derive(Debug, Clone)]
pub struct RandomWeek {
    seed: u64,
    rng: ChaCha8Rng,
    pub start: NaiveDate,
    pub current: Vitals,
}

impl RandomWeek {
    pub const DAYS: usize = 7;

    pub fn new(seed: u64, current: Vitals) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
            current,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SampleGenerator for RandomWeek {
    fn generate(&mut self) -> Series {
        let mut series = Series::new();
        for i in 0..Self::DAYS {
            let Some(date) = self.start.checked_add_days(Days::new(i as u64)) else {
                break;
            };
            let mut vitals = self.current;
            if i + 1 < Self::DAYS {
                vitals.heart_rate = f64::from(self.rng.gen_range(65_u32..95));
                vitals.steps = f64::from(self.rng.gen_range(8000_u32..15000));
            }
            series.push(date, vitals.into());
        }
        series
    }

    fn description(&self) -> String {
        format!("random week (seed {})", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::IntakeRanges;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_pattern_shape() {
        let series = MonthlyPattern::default().generate();
        assert_eq!(series.len(), 30);
        assert_eq!(series.first().unwrap().date, date(2025, 1, 1));
        assert_eq!(series.last().unwrap().date, date(2025, 1, 30));

        let steps = series.values(Metric::Steps);
        assert_eq!(&steps[..6], &[8000.0, 9000.0, 10000.0, 11000.0, 12000.0, 8000.0]);

        let heart = series.values(Metric::HeartRate);
        assert_eq!(&heart[..5], &[70.0, 75.0, 80.0, 85.0, 70.0]);
    }

    #[test]
    fn random_week_is_reproducible_for_a_seed() {
        let current = IntakeRanges::default().defaults();
        let a = RandomWeek::new(42, current).generate();
        let b = RandomWeek::new(42, current).generate();
        assert_eq!(a, b);
        assert_eq!(a.len(), RandomWeek::DAYS);
    }

    #[test]
    fn random_week_ends_at_current_readings() {
        let mut current = IntakeRanges::default().defaults();
        current.heart_rate = 130.0;
        let series = RandomWeek::new(7, current).generate();

        let last = series.last().unwrap();
        assert_eq!(last.date, date(2025, 3, 7));
        assert_eq!(last.readings, ReadingSet::from(current));

        for entry in series.entries().take(RandomWeek::DAYS - 1) {
            let hr = entry.readings.get(Metric::HeartRate).unwrap();
            let steps = entry.readings.get(Metric::Steps).unwrap();
            assert!((65.0..95.0).contains(&hr));
            assert!((8000.0..15000.0).contains(&steps));
            assert_eq!(entry.readings.get(Metric::Weight), Some(current.weight));
        }
    }

    #[test]
    fn extend_with_dates_the_next_day() {
        let mut series = Series::new();
        let start = date(2025, 2, 27);
        assert_eq!(series.extend_with(ReadingSet::new(), start), start);
        assert_eq!(series.extend_with(ReadingSet::new(), start), date(2025, 2, 28));
        assert_eq!(series.extend_with(ReadingSet::new(), start), date(2025, 3, 1));
    }

    #[test]
    fn series_caps_at_max_len() {
        let mut series = Series::new();
        let start = date(2024, 1, 1);
        for i in 0..(MAX_SERIES_LEN + 10) {
            series.extend_with(ReadingSet::new().with(Metric::Steps, i as f64), start);
        }
        assert_eq!(series.len(), MAX_SERIES_LEN);
        assert_eq!(series.first().unwrap().readings.get(Metric::Steps), Some(10.0));
    }

    #[test]
    fn values_skip_entries_without_metric() {
        let mut series = Series::new();
        let start = date(2025, 1, 1);
        series.extend_with(ReadingSet::new().with(Metric::Weight, 80.0), start);
        series.extend_with(ReadingSet::new().with(Metric::Steps, 4000.0), start);
        assert_eq!(series.values(Metric::Weight), vec![80.0]);
    }
}
