//! Service calendar resolution.
//!
//! Turns a feed's weekly calendar and its date-specific exceptions into the
//! set of services that actually operate on each date:
//!
//! 1. [`expand_calendar`] enumerates the recurring schedule into base rows.
//! 2. [`apply_exceptions`] adds and then removes individual (date, service)
//!    pairs.
//! 3. The result is wrapped in a [`DateServiceTable`] for lookups.
//!
//! [`resolve_date_services`] runs all three steps.

mod entry;
mod expand;
mod overlay;
mod resolve;
mod table;


pub use entry::{
    ALL_WEEKDAYS, CalendarEntry, CalendarException, DateServiceRow, ExceptionType,
    InvalidExceptionType,
};
pub use expand::{date_span, expand_calendar};
pub use overlay::apply_exceptions;
pub use resolve::{Observation, Resolution, resolve_date_services};
pub use table::DateServiceTable;
