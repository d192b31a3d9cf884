//! Provides structures and traits related to subscription management.
//!
//! This module includes `Subscriber` for handling observed values, errors, and
//! completions, and `Subscription` for controlling the work started by
//! subscribing to observables and subjects.
//!
//! Additionally, it defines enums and traits for subscription handling, awaiting
//! asynchronous subscriptions and defining unsubscribe logic.
pub mod subscribe;
