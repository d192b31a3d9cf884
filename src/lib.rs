//! Automatic subscription lifecycle management for reactive UI components.
//!
//! A component registers its subscriptions with a [`SubscriptionTracker`] and
//! they are all cancelled when the component is torn down. The tracker can be
//! composed onto any [`Lifecycle`] type with
//! [`TrackSubscriptions::with_subscription_tracker`], or embedded as a field of a
//! component implementing [`TracksSubscriptions`].
//!
//! The crate also carries the reactive building blocks the tracker consumes:
//! [`Observable`], [`subjects::Subject`], [`subscribe::Subscriber`] and
//! [`subscribe::Subscription`].
//!
//! # Example
//!
//! ```no_run
//! use rxtrack::{subjects::Subject, Lifecycle, Observer, TrackSubscriptions};
//!
//! struct SearchBox;
//!
//! impl Lifecycle for SearchBox {
//!     fn on_destroy(&mut self) {
//!         println!("search box destroyed");
//!     }
//! }
//!
//! let (mut queries, mut queries_rx) = Subject::emitter_receiver();
//! let (mut results, mut results_rx) = Subject::emitter_receiver();
//!
//! let mut search_box = SearchBox.with_subscription_tracker();
//! let query_key = search_box.subscribe_next(&mut queries_rx, |q: String| println!("query {}", q));
//! search_box.subscribe_next(&mut results_rx, |n: usize| println!("{} results", n));
//!
//! queries.next("rust".to_string());
//! search_box.unsubscribe(query_key);
//! queries.next("ignored".to_string());
//!
//! // Cancels the remaining subscription, then runs `on_destroy`.
//! search_box.destroy();
//! results.next(3); // Not delivered.
//! ```

mod component;
mod errors;
mod observable;
mod observer;
pub mod subjects;
mod subscription;
mod tracker;

pub use component::*;
pub use errors::*;
pub use observable::*;
pub use observer::Observer;
pub use subjects::Subject;
pub use subscription::subscribe;
pub use subscription::subscribe::{Subscribeable, Unsubscribeable};
pub use tracker::{SubscriptionKey, SubscriptionTracker, TrackerConfig};
