//! Domain types for the metro API.
//!
//! This module contains the validated value types used by the handlers.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod headway;
mod service_window;
mod station;
mod time;

pub use headway::{Headway, InvalidHeadway};
pub use service_window::{ServiceStatus, classify, classify_hm};
pub use station::{MissingStation, StationName};
pub use time::{ClockTime, MINUTES_PER_DAY, TimeError, next_arrival, next_time_from};
