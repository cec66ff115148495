//! Service calendar resolution for scheduled-transit feeds.
//!
//! Answers "which services run on which dates?" by expanding a feed's
//! weekly calendar and applying its date-specific exceptions, and provides
//! the service-day time parsing and hour-of-day filtering that downstream
//! analysis builds on.

pub mod calendar;
pub mod domain;
pub mod feed;
pub mod filter;
