//! Headway-based trip frequencies and their parsed bounds.

use serde::Deserialize;

use crate::domain::{ServiceTime, parse_time_column};

/// A frequency row as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Frequency {
    pub trip_id: String,
    pub start_time: String,
    pub end_time: String,
    pub headway_secs: u32,
    pub exact_times: Option<u8>,
}

impl Frequency {
    pub fn new(
        trip_id: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        headway_secs: u32,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            headway_secs,
            exact_times: None,
        }
    }
}

/// A frequency together with its parsed start/end durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedFrequency {
    pub frequency: Frequency,
    pub start_time_hms: Option<ServiceTime>,
    pub end_time_hms: Option<ServiceTime>,
}

impl TimedFrequency {
    /// Number of departures the headway implies within `[start, end)`.
    ///
    /// `None` when either bound failed to parse or the headway is zero.
    pub fn departures(&self) -> Option<u32> {
        let start = self.start_time_hms?.as_secs();
        let end = self.end_time_hms?.as_secs();
        if self.frequency.headway_secs == 0 {
            return None;
        }
        Some(end.saturating_sub(start).div_ceil(self.frequency.headway_secs))
    }
}

/// Frequencies with parsed start and end times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimedFrequencies {
    rows: Vec<TimedFrequency>,
    failed_rows: Vec<usize>,
}

impl TimedFrequencies {
    /// Parse start and end times for every row, tolerating bad rows.
    pub fn parse(frequencies: &[Frequency]) -> Self {
        let starts: Vec<Option<&str>> = frequencies
            .iter()
            .map(|f| Some(f.start_time.as_str()))
            .collect();
        let ends: Vec<Option<&str>> = frequencies
            .iter()
            .map(|f| Some(f.end_time.as_str()))
            .collect();

        let starts = parse_time_column(&starts);
        let ends = parse_time_column(&ends);

        let mut failed_rows: Vec<usize> = starts
            .failed_rows()
            .iter()
            .chain(ends.failed_rows())
            .copied()
            .collect();
        failed_rows.sort_unstable();
        failed_rows.dedup();

        let rows = frequencies
            .iter()
            .zip(starts.into_values())
            .zip(ends.into_values())
            .map(|((f, start), end)| TimedFrequency {
                frequency: f.clone(),
                start_time_hms: start,
                end_time_hms: end,
            })
            .collect();

        Self { rows, failed_rows }
    }

    pub fn rows(&self) -> &[TimedFrequency] {
        &self.rows
    }

    /// Indices of rows with a malformed start or end time.
    pub fn failed_rows(&self) -> &[usize] {
        &self.failed_rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bounds() {
        let raw = vec![Frequency::new("T1", "06:00:00", "25:00:00", 600)];

        let timed = TimedFrequencies::parse(&raw);

        assert_eq!(timed.len(), 1);
        assert_eq!(timed.rows()[0].start_time_hms, Some(ServiceTime::from_secs(21600)));
        assert_eq!(timed.rows()[0].end_time_hms, Some(ServiceTime::from_secs(90000)));
        assert_eq!(timed.rows()[0].frequency, raw[0]);
    }

    #[test]
    fn tolerates_bad_rows() {
        let raw = vec![
            Frequency::new("T1", "06:00:00", "07:00:00", 600),
            Frequency::new("T2", "six", "07:00:00", 600),
        ];

        let timed = TimedFrequencies::parse(&raw);

        assert_eq!(timed.failed_rows(), &[1]);
        assert_eq!(timed.rows()[1].start_time_hms, None);
        assert!(timed.rows()[1].end_time_hms.is_some());
    }

    #[test]
    fn departures_in_window() {
        let timed = TimedFrequencies::parse(&[
            Frequency::new("T1", "06:00:00", "07:00:00", 600),
            Frequency::new("T2", "06:00:00", "06:25:00", 600),
            Frequency::new("T3", "06:00:00", "07:00:00", 0),
            Frequency::new("T4", "bad", "07:00:00", 600),
        ]);

        assert_eq!(timed.rows()[0].departures(), Some(6));
        assert_eq!(timed.rows()[1].departures(), Some(3));
        assert_eq!(timed.rows()[2].departures(), None);
        assert_eq!(timed.rows()[3].departures(), None);
    }
}
