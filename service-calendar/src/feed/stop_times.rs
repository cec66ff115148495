//! Stop times and their parsed arrival/departure durations.

use serde::Deserialize;

use crate::domain::{ServiceTime, parse_time_column};

/// A stop time row as it appears in the feed.
///
/// Times are kept as text; see [`TimedStopTimes`] for the parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopTime {
    pub trip_id: String,
    #[serde(default)]
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

impl StopTime {
    pub fn new(
        trip_id: impl Into<String>,
        stop_id: impl Into<String>,
        stop_sequence: u32,
        arrival_time: Option<&str>,
        departure_time: Option<&str>,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            stop_id: stop_id.into(),
            stop_sequence,
            arrival_time: arrival_time.map(str::to_string),
            departure_time: departure_time.map(str::to_string),
        }
    }
}

/// A stop time together with its parsed durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedStopTime {
    /// The original row, text times included.
    pub stop_time: StopTime,
    pub arrival_time_hms: Option<ServiceTime>,
    pub departure_time_hms: Option<ServiceTime>,
}

/// Stop times whose arrival and departure durations have been parsed.
///
/// Values of this type only come from [`TimedStopTimes::parse`], so anything
/// holding one can rely on the duration fields being present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimedStopTimes {
    rows: Vec<TimedStopTime>,
    failed_rows: Vec<usize>,
}

impl TimedStopTimes {
    /// Parse arrival and departure times for every row.
    ///
    /// Malformed times become `None` and the row index is recorded in
    /// [`TimedStopTimes::failed_rows`]; parsing never fails as a whole.
    pub fn parse(stop_times: &[StopTime]) -> Self {
        let arrivals: Vec<Option<&str>> = stop_times
            .iter()
            .map(|st| st.arrival_time.as_deref())
            .collect();
        let departures: Vec<Option<&str>> = stop_times
            .iter()
            .map(|st| st.departure_time.as_deref())
            .collect();

        let arrivals = parse_time_column(&arrivals);
        let departures = parse_time_column(&departures);

        let mut failed_rows: Vec<usize> = arrivals
            .failed_rows()
            .iter()
            .chain(departures.failed_rows())
            .copied()
            .collect();
        failed_rows.sort_unstable();
        failed_rows.dedup();

        let rows = stop_times
            .iter()
            .zip(arrivals.into_values())
            .zip(departures.into_values())
            .map(|((st, arrival), departure)| TimedStopTime {
                stop_time: st.clone(),
                arrival_time_hms: arrival,
                departure_time_hms: departure,
            })
            .collect();

        Self { rows, failed_rows }
    }

    pub fn rows(&self) -> &[TimedStopTime] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedStopTime> {
        self.rows.iter()
    }

    /// Indices of rows with a malformed arrival or departure time.
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
