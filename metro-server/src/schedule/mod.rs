//! Schedule lookup.
//!
//! Resolves a station name against the last-departure table held in the
//! configuration store. Matching ignores case and the response carries the
//! station name exactly as stored.

mod lookup;
mod table;

pub use lookup::{LastMetro, LookupError, last_metro};
pub use table::{Defaults, LastMetroEntry, LastMetroTable};
