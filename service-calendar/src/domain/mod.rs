//! Domain types for service calendar resolution.
//!
//! This module contains the validated value types shared by the calendar,
//! feed and filter layers. All types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod service_id;
mod time;

pub use error::FeedError;
pub use service_id::{InvalidServiceId, ServiceId};
pub use time::{ParsedTimes, SECONDS_PER_DAY, ServiceTime, TimeError, parse_time_column};
