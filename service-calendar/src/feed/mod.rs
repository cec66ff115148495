//! The feed aggregate.
//!
//! A [`Feed`] is an immutable value. Its relations are shared through `Arc`,
//! so every derivation step ([`Feed::parse_times`],
//! [`Feed::resolve_service_dates`]) cheaply returns a *new* feed and leaves
//! the one it was called on untouched. Callers can keep before and after
//! snapshots side by side.

mod frequencies;
mod load;
mod stop_times;

pub use frequencies::{Frequency, TimedFrequencies, TimedFrequency};
pub use load::{LoadConfig, LoadError, load_feed};
pub use stop_times::{StopTime, TimedStopTime, TimedStopTimes};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::calendar::{
    CalendarEntry, CalendarException, DateServiceTable, Observation, resolve_date_services,
};
use crate::domain::FeedError;
use crate::filter::{HourWindow, filter_by_hour};

/// Computed data attached to a feed, kept apart from its source relations.
#[derive(Debug, Clone, Default)]
pub struct DerivedData {
    date_service_table: Option<Arc<DateServiceTable>>,
}

impl DerivedData {
    /// The resolved date-service table, if the feed has been resolved.
    pub fn date_service_table(&self) -> Option<&DateServiceTable> {
        self.date_service_table.as_deref()
    }
}

/// A transit feed: source relations plus derived data.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    calendar: Arc<Vec<CalendarEntry>>,
    calendar_dates: Option<Arc<Vec<CalendarException>>>,
    stop_times: Arc<Vec<StopTime>>,
    frequencies: Option<Arc<Vec<Frequency>>>,

    timed_stop_times: Option<Arc<TimedStopTimes>>,
    timed_frequencies: Option<Arc<TimedFrequencies>>,
    derived: DerivedData,
}

impl Feed {
    /// Create a feed from its weekly calendar.
    pub fn new(calendar: Vec<CalendarEntry>) -> Self {
        Self {
            calendar: Arc::new(calendar),
            ..Self::default()
        }
    }

    /// Set the calendar exceptions.
    pub fn with_calendar_dates(mut self, calendar_dates: Vec<CalendarException>) -> Self {
        self.calendar_dates = Some(Arc::new(calendar_dates));
        self
    }

    /// Set the stop times.
    pub fn with_stop_times(mut self, stop_times: Vec<StopTime>) -> Self {
        self.stop_times = Arc::new(stop_times);
        self.timed_stop_times = None;
        self
    }

    /// Set the frequencies.
    pub fn with_frequencies(mut self, frequencies: Vec<Frequency>) -> Self {
        self.frequencies = Some(Arc::new(frequencies));
        self.timed_frequencies = None;
        self
    }

    pub fn calendar(&self) -> &[CalendarEntry] {
        &self.calendar
    }

    /// Calendar exceptions, if the feed has any.
    pub fn calendar_dates(&self) -> Option<&[CalendarException]> {
        self.calendar_dates.as_deref().map(Vec::as_slice)
    }

    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    pub fn frequencies(&self) -> Option<&[Frequency]> {
        self.frequencies.as_deref().map(Vec::as_slice)
    }

    /// Stop times with parsed durations.
    ///
    /// Fails with [`FeedError::MissingDurations`] until
    /// [`Feed::parse_times`] has produced them.
    pub fn timed_stop_times(&self) -> Result<&TimedStopTimes, FeedError> {
        self.timed_stop_times
            .as_deref()
            .ok_or(FeedError::MissingDurations)
    }

    /// Frequencies with parsed bounds, when the feed has non-empty
    /// frequencies and its times have been parsed.
    pub fn timed_frequencies(&self) -> Option<&TimedFrequencies> {
        self.timed_frequencies.as_deref()
    }

    pub fn derived(&self) -> &DerivedData {
        &self.derived
    }

    /// Shortcut for the derived date-service table.
    pub fn date_service_table(&self) -> Option<&DateServiceTable> {
        self.derived.date_service_table()
    }

    /// Return a new feed with stop time and frequency durations parsed.
    ///
    /// Frequencies are only parsed when present and non-empty. Malformed
    /// times do not fail the step; they are counted in a warning and listed
    /// on the parsed relations.
    pub fn parse_times(&self) -> Feed {
        let timed_stop_times = TimedStopTimes::parse(&self.stop_times);
        if !timed_stop_times.failed_rows().is_empty() {
            warn!(
                failed = timed_stop_times.failed_rows().len(),
                rows = timed_stop_times.len(),
                "stop times with malformed arrival or departure"
            );
        }

        let timed_frequencies = self
            .frequencies
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| TimedFrequencies::parse(f));
        if let Some(tf) = &timed_frequencies
            && !tf.failed_rows().is_empty()
        {
            warn!(
                failed = tf.failed_rows().len(),
                rows = tf.len(),
                "frequencies with malformed start or end"
            );
        }

        debug!(
            stop_times = timed_stop_times.len(),
            frequencies = timed_frequencies.as_ref().map_or(0, |f| f.len()),
            "parsed feed times"
        );

        Feed {
            timed_stop_times: Some(Arc::new(timed_stop_times)),
            timed_frequencies: timed_frequencies.map(Arc::new),
            ..self.clone()
        }
    }

    /// Return a new feed carrying a freshly resolved date-service table.
    ///
    /// Any table already attached is replaced wholesale. Non-fatal
    /// observations (such as an empty result) are returned alongside.
    pub fn resolve_service_dates(&self) -> (Feed, Vec<Observation>) {
        let resolution = resolve_date_services(
            &self.calendar,
            self.calendar_dates().unwrap_or_default(),
        );

        let feed = Feed {
            derived: DerivedData {
                date_service_table: Some(Arc::new(resolution.table)),
            },
            ..self.clone()
        };
        (feed, resolution.observations)
    }

    /// Stop times falling strictly inside an hour window.
    ///
    /// Fails fast if the feed's times have not been parsed. A window whose
    /// start is not before its end simply selects nothing.
    pub fn stop_times_in_hours(
        &self,
        window: &HourWindow,
    ) -> Result<Vec<&TimedStopTime>, FeedError> {
        let timed = self.timed_stop_times()?;
        Ok(filter_by_hour(timed, window))
    }
}
