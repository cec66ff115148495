//! Resolved date-service table.
//!
//! The table holds the final set of (date, service) rows and keeps two
//! lookup indexes alongside it, so the common downstream questions ("what
//! runs on day X?", "when does service Y run?") are map probes rather than
//! scans.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::entry::DateServiceRow;
use crate::domain::ServiceId;

/// The resolved mapping of dates to the services operating on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateServiceTable {
    /// All rows, ordered by date then service id.
    rows: BTreeSet<DateServiceRow>,

    /// Map from date -> services running that day (sorted).
    by_date: BTreeMap<NaiveDate, Vec<ServiceId>>,

    /// Map from service -> dates it runs (sorted).
    by_service: HashMap<ServiceId, Vec<NaiveDate>>,
}

impl DateServiceTable {
    /// Build the table and its indexes from a resolved row set.
    pub fn from_rows(rows: BTreeSet<DateServiceRow>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<ServiceId>> = BTreeMap::new();
        let mut by_service: HashMap<ServiceId, Vec<NaiveDate>> = HashMap::new();

        // Rows iterate in (date, service) order, so both index vectors come
        // out sorted without a separate pass.
        for row in &rows {
            by_date
                .entry(row.date)
                .or_default()
                .push(row.service_id.clone());
            by_service
                .entry(row.service_id.clone())
                .or_default()
                .push(row.date);
        }

        Self {
            rows,
            by_date,
            by_service,
        }
    }

    /// Number of (date, service) rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in (date, service) order.
    pub fn rows(&self) -> impl Iterator<Item = &DateServiceRow> {
        self.rows.iter()
    }

    /// Consumes the table and returns the row set.
    pub fn into_rows(self) -> BTreeSet<DateServiceRow> {
        self.rows
    }

    /// Check whether a service runs on a date.
    pub fn is_active(&self, date: NaiveDate, service_id: &ServiceId) -> bool {
        self.services_on(date).binary_search(service_id).is_ok()
    }

    /// Services running on a date, sorted by id.
    pub fn services_on(&self, date: NaiveDate) -> &[ServiceId] {
        self.by_date.get(&date).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Dates a service runs on, in ascending order.
    pub fn dates_for(&self, service_id: &ServiceId) -> &[NaiveDate] {
        self.by_service
            .get(service_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Dates that have at least one service, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Distinct services appearing in the table, in no particular order.
    pub fn service_ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.by_service.keys()
    }

    /// Full date -> services mapping.
    pub fn by_date(&self) -> &BTreeMap<NaiveDate, Vec<ServiceId>> {
        &self.by_date
    }

    /// First and last dates with any service.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.by_date.keys().next()?;
        let last = self.by_date.keys().next_back()?;
        Some((*first, *last))
    }

    /// Number of services running on each date with service.
    pub fn service_counts(&self) -> BTreeMap<NaiveDate, usize> {
        self.by_date
            .iter()
            .map(|(date, services)| (*date, services.len()))
            .collect()
    }

    /// The date with the most services, and that count.
    ///
    /// Ties go to the earliest date.
    pub fn busiest_date(&self) -> Option<(NaiveDate, usize)> {
        self.by_date
            .iter()
            .map(|(date, services)| (*date, services.len()))
            .fold(None, |best, (date, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((date, count)),
            })
    }
}

impl From<BTreeSet<DateServiceRow>> for DateServiceTable {
    fn from(rows: BTreeSet<DateServiceRow>) -> Self {
        Self::from_rows(rows)
    }
}

impl Serialize for DateServiceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sid(s: &str) -> ServiceId {
        ServiceId::new(s.to_string()).unwrap()
    }

    fn table(rows: &[(NaiveDate, &str)]) -> DateServiceTable {
        rows.iter()
            .map(|(d, id)| DateServiceRow::new(*d, sid(id)))
            .collect::<BTreeSet<_>>()
            .into()
    }

    #[test]
    fn empty_table() {
        let t = DateServiceTable::default();

        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(t.services_on(date(2020, 1, 1)).is_empty());
        assert!(t.dates_for(&sid("A")).is_empty());
        assert_eq!(t.date_range(), None);
        assert_eq!(t.busiest_date(), None);
        assert!(t.service_counts().is_empty());
    }

    #[test]
    fn lookups_by_date_and_service() {
        let t = table(&[
            (date(2020, 1, 2), "B"),
            (date(2020, 1, 1), "A"),
            (date(2020, 1, 2), "A"),
        ]);

        assert_eq!(t.len(), 3);
        assert_eq!(t.services_on(date(2020, 1, 2)), &[sid("A"), sid("B")]);
        assert_eq!(t.services_on(date(2020, 1, 1)), &[sid("A")]);
        assert_eq!(t.dates_for(&sid("A")), &[date(2020, 1, 1), date(2020, 1, 2)]);
        assert_eq!(t.dates_for(&sid("B")), &[date(2020, 1, 2)]);

        assert!(t.is_active(date(2020, 1, 2), &sid("B")));
        assert!(!t.is_active(date(2020, 1, 1), &sid("B")));
        assert!(!t.is_active(date(2020, 1, 3), &sid("A")));
    }

    #[test]
    fn date_range_and_counts() {
        let t = table(&[
            (date(2020, 1, 5), "A"),
            (date(2020, 1, 1), "A"),
            (date(2020, 1, 3), "A"),
            (date(2020, 1, 3), "B"),
        ]);

        assert_eq!(t.date_range(), Some((date(2020, 1, 1), date(2020, 1, 5))));
        assert_eq!(
            t.dates().collect::<Vec<_>>(),
            vec![date(2020, 1, 1), date(2020, 1, 3), date(2020, 1, 5)]
        );

        let counts = t.service_counts();
        assert_eq!(counts[&date(2020, 1, 3)], 2);
        assert_eq!(counts[&date(2020, 1, 5)], 1);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn busiest_date_prefers_earliest_on_tie() {
        let t = table(&[
            (date(2020, 1, 1), "A"),
            (date(2020, 1, 2), "A"),
            (date(2020, 1, 2), "B"),
            (date(2020, 1, 3), "A"),
            (date(2020, 1, 3), "B"),
        ]);

        assert_eq!(t.busiest_date(), Some((date(2020, 1, 2), 2)));
    }

    #[test]
    fn rows_iterate_in_order() {
        let t = table(&[(date(2020, 1, 2), "A"), (date(2020, 1, 1), "Z")]);
        let ids: Vec<&str> = t.rows().map(|r| r.service_id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A"]);

        let mut services: Vec<&ServiceId> = t.service_ids().collect();
        services.sort();
        assert_eq!(services, vec![&sid("A"), &sid("Z")]);
    }

    #[test]
    fn serializes_as_row_list() {
        let t = table(&[(date(2020, 1, 6), "svcA")]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"date":"2020-01-06","service_id":"svcA"}]"#);
    }

    #[test]
    fn into_rows_roundtrip() {
        let t = table(&[(date(2020, 1, 6), "svcA"), (date(2020, 1, 7), "svcA")]);
        let rows = t.clone().into_rows();
        assert_eq!(DateServiceTable::from_rows(rows), t);
    }
}
