//! The `subjects` module provides a multicasting `Subject`, a hot source that
//! UI components typically subscribe to (clicks, store updates, timers).
//!
//! A `Subject` is split into emitter and receiver using the `emitter_receiver`
//! function. The `SubjectEmitter` behaves as an `Observer`, enabling `next()`,
//! `error()` and `complete()` calls. The `SubjectReceiver` is `Subscribeable`, so
//! it can be handed to a subscription tracker like any other observable.

mod subject;

pub use subject::*;
