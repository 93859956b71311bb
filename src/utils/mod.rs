//! Utility modules shared by the route screens.
//!
//! - [`datetime`] - Date/time masks, parsing, storage conversion and trip durations
//! - [`money`] - Price masks and BRL formatting
//!
//! Everything here is a pure function of its inputs (plus the wall clock for
//! time-only schedule input) and safe to call on every keystroke.

pub mod datetime;
pub mod money;
