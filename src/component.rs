//! Attaching a subscription tracker to UI components.
//!
//! There are two ways to give a component automatic subscription cleanup:
//!
//! - Wrap it: any `Lifecycle` type gets `with_subscription_tracker()`, which
//!   returns a `Tracked` wrapper owning both the component and a fresh tracker.
//!   Teardown, explicit through `Tracked::destroy` or implicit on drop, cancels
//!   every subscription and then runs `Lifecycle::on_destroy`, exactly once.
//! - Embed it: a component that keeps a `SubscriptionTracker` field implements
//!   `TracksSubscriptions` and gets `subscribe`/`unsubscribe`/`unsubscribe_all`
//!   for free. Its subscriptions are cancelled when the tracker field is dropped.

use std::{
    any::type_name,
    ops::{Deref, DerefMut},
};

use crate::subscription::subscribe::{Subscribeable, Subscriber};
use crate::tracker::{SubscriptionKey, SubscriptionTracker, TrackerConfig};

/// The lifecycle of a host component.
pub trait Lifecycle {
    /// Called once when the component is torn down, after its tracked
    /// subscriptions have been cancelled.
    fn on_destroy(&mut self) {}
}

/// Composes subscription tracking into any `Lifecycle` type.
pub trait TrackSubscriptions: Lifecycle + Sized {
    fn with_subscription_tracker(self) -> Tracked<Self> {
        Tracked::new(self)
    }

    fn with_subscription_tracker_config(self, config: TrackerConfig) -> Tracked<Self> {
        Tracked::with_config(self, config)
    }
}

impl<C: Lifecycle> TrackSubscriptions for C {}

/// A component together with the tracker that owns its subscriptions.
///
/// Derefs to the wrapped component.
///
/// ```no_run
/// use rxtrack::{subjects::Subject, Lifecycle, Observer, TrackSubscriptions};
///
/// #[derive(Default)]
/// struct Counter {
///     total: u64,
/// }
///
/// impl Lifecycle for Counter {}
///
/// let (mut ticks, mut ticks_rx) = Subject::emitter_receiver();
/// let mut counter = Counter::default().with_subscription_tracker();
///
/// counter.subscribe_next(&mut ticks_rx, |n: u64| println!("tick {}", n));
/// ticks.next(1);
///
/// counter.destroy(); // Cancels the tick subscription.
/// ticks.next(2); // Not delivered.
/// ```
pub struct Tracked<C: Lifecycle> {
    component: C,
    tracker: SubscriptionTracker,
    torn_down: bool,
}

impl<C: Lifecycle> Tracked<C> {
    pub fn new(component: C) -> Self {
        Self::with_config(component, TrackerConfig::default())
    }

    pub fn with_config(component: C, config: TrackerConfig) -> Self {
        Tracked {
            component,
            tracker: SubscriptionTracker::with_config(config),
            torn_down: false,
        }
    }

    /// See [`SubscriptionTracker::subscribe`].
    pub fn subscribe<S>(&mut self, source: &mut S, subscriber: Subscriber<S::ObsType>) -> SubscriptionKey
    where
        S: Subscribeable + ?Sized,
        S::ObsType: 'static,
    {
        self.tracker.subscribe(source, subscriber)
    }

    /// See [`SubscriptionTracker::subscribe_next`].
    pub fn subscribe_next<S>(
        &mut self,
        source: &mut S,
        next_fn: impl FnMut(S::ObsType) + Send + 'static,
    ) -> SubscriptionKey
    where
        S: Subscribeable + ?Sized,
        S::ObsType: 'static,
    {
        self.tracker.subscribe_next(source, next_fn)
    }

    /// See [`SubscriptionTracker::unsubscribe`].
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> SubscriptionKey {
        self.tracker.unsubscribe(key)
    }

    pub fn unsubscribe_all(&mut self) {
        self.tracker.unsubscribe_all();
    }

    pub fn tracker(&self) -> &SubscriptionTracker {
        &self.tracker
    }

    /// Tears the component down now instead of waiting for it to be dropped.
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        tracing::debug!(
            component = type_name::<C>(),
            active = self.tracker.len(),
            "tearing down component"
        );
        self.tracker.unsubscribe_all();
        self.component.on_destroy();
    }
}

impl<C: Lifecycle> Deref for Tracked<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.component
    }
}

impl<C: Lifecycle> DerefMut for Tracked<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.component
    }
}

impl<C: Lifecycle> Drop for Tracked<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Subscription methods for components that embed a `SubscriptionTracker`.
pub trait TracksSubscriptions {
    fn subscription_tracker(&mut self) -> &mut SubscriptionTracker;

    fn subscribe<S>(&mut self, source: &mut S, subscriber: Subscriber<S::ObsType>) -> SubscriptionKey
    where
        S: Subscribeable + ?Sized,
        S::ObsType: 'static,
    {
        self.subscription_tracker().subscribe(source, subscriber)
    }

    fn unsubscribe(&mut self, key: SubscriptionKey) -> SubscriptionKey {
        self.subscription_tracker().unsubscribe(key)
    }

    fn unsubscribe_all(&mut self) {
        self.subscription_tracker().unsubscribe_all();
    }
}

impl<C: Lifecycle> TracksSubscriptions for Tracked<C> {
    fn subscription_tracker(&mut self) -> &mut SubscriptionTracker {
        &mut self.tracker
    }
}
