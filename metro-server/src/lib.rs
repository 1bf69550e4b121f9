//! Dernier Métro API.
//!
//! A small HTTP service answering "when is the next train?" and "when is
//! the last train?" for stations of a simulated Paris metro line.

pub mod clock;
pub mod config;
pub mod domain;
pub mod schedule;
pub mod store;
pub mod web;
