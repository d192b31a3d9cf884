//! Error types shared across the crate.
//!
//! `ObservableError` is a ready-made error value that observables can emit through
//! `Observer::error`. `TrackerError` is returned when awaiting the work behind a
//! `Subscription` fails.

mod observable_errors;
mod tracker_errors;

pub use observable_errors::*;
pub use tracker_errors::*;
