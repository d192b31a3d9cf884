//! Per-component registry of live subscriptions.
//!
//! A `SubscriptionTracker` subscribes to sources on behalf of its owner, keeps
//! every resulting `Subscription` under a `SubscriptionKey`, and cancels them
//! individually, all at once, or when the tracker is dropped.

mod config;

pub use config::TrackerConfig;

use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::observer::Observer;
use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, Unsubscribeable,
};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of a subscription registered with a `SubscriptionTracker`.
///
/// Keys are unique for the lifetime of the process, so a key issued by one
/// tracker never matches an entry of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionKey(u64);

impl SubscriptionKey {
    fn next() -> Self {
        SubscriptionKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

struct TrackedEntry {
    subscription: Subscription,
    // Shared with the gated subscriber; cleared before the source is told to stop.
    active: Arc<AtomicBool>,
}

impl TrackedEntry {
    fn cancel(self) {
        self.active.store(false, Ordering::SeqCst);
        self.subscription.unsubscribe();
    }
}

/// Wraps `subscriber` so that nothing reaches it once `active` is cleared,
/// even if the producer keeps emitting until it notices the unsubscribe signal.
fn gated<T: 'static>(subscriber: Subscriber<T>, active: &Arc<AtomicBool>) -> Subscriber<T> {
    let s_shared = Arc::new(Mutex::new(subscriber));
    let s_cloned_e = Arc::clone(&s_shared);
    let s_cloned_c = Arc::clone(&s_shared);

    let active_n = Arc::clone(active);
    let active_e = Arc::clone(active);
    let active_c = Arc::clone(active);

    Subscriber::new(
        move |v| {
            if active_n.load(Ordering::SeqCst) {
                if let Ok(mut s) = s_shared.lock() {
                    s.next(v);
                }
            }
        },
        move |observable_error| {
            if active_e.load(Ordering::SeqCst) {
                if let Ok(mut s) = s_cloned_e.lock() {
                    s.error(observable_error);
                }
            }
        },
        move || {
            if active_c.load(Ordering::SeqCst) {
                if let Ok(mut s) = s_cloned_c.lock() {
                    s.complete();
                }
            }
        },
    )
}

/// Keeps the subscriptions of one owner alive and cancels them on request or
/// when dropped.
///
/// Mutation takes `&mut self`: a tracker belongs to exactly one component and
/// is never shared, so it needs no locking of its own.
///
/// Once `unsubscribe` returns, no callback of that subscriber starts again. A
/// callback already running on a producer thread at that moment still finishes.
///
/// ```no_run
/// use rxtrack::{subjects::Subject, Observer, SubscriptionTracker};
///
/// let (mut clicks, mut clicks_rx) = Subject::emitter_receiver();
/// let mut tracker = SubscriptionTracker::new();
///
/// let key = tracker.subscribe_next(&mut clicks_rx, |n: u32| println!("click {}", n));
/// clicks.next(1);
///
/// tracker.unsubscribe(key);
/// clicks.next(2); // Not delivered.
/// ```
pub struct SubscriptionTracker {
    entries: HashMap<SubscriptionKey, TrackedEntry>,
    config: TrackerConfig,
}

impl SubscriptionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    #[must_use]
    pub fn with_config(config: TrackerConfig) -> Self {
        SubscriptionTracker {
            entries: HashMap::with_capacity(config.capacity),
            config,
        }
    }

    /// Subscribes `subscriber` to `source` and keeps the resulting subscription
    /// until it is unsubscribed or the tracker goes away.
    ///
    /// Errors emitted by `source` go to the subscriber's error function when it
    /// has one.
    pub fn subscribe<S>(&mut self, source: &mut S, subscriber: Subscriber<S::ObsType>) -> SubscriptionKey
    where
        S: Subscribeable + ?Sized,
        S::ObsType: 'static,
    {
        let key = SubscriptionKey::next();
        let active = Arc::new(AtomicBool::new(true));

        let subscription = source.subscribe(gated(subscriber, &active));
        self.entries.insert(
            key,
            TrackedEntry {
                subscription,
                active,
            },
        );

        tracing::trace!(
            tracker = self.config.name(),
            %key,
            active = self.entries.len(),
            "subscription tracked"
        );
        key
    }

    /// Shorthand for `subscribe` with only a `next` function.
    pub fn subscribe_next<S>(
        &mut self,
        source: &mut S,
        next_fn: impl FnMut(S::ObsType) + Send + 'static,
    ) -> SubscriptionKey
    where
        S: Subscribeable + ?Sized,
        S::ObsType: 'static,
    {
        self.subscribe(source, Subscriber::on_next(next_fn))
    }

    /// Cancels and forgets the subscription under `key`.
    ///
    /// Unknown or already cancelled keys are ignored. The key is returned in
    /// either case, so the result says nothing about whether anything was
    /// cancelled; use `contains` beforehand for that.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> SubscriptionKey {
        if let Some(entry) = self.entries.remove(&key) {
            entry.cancel();
            tracing::trace!(
                tracker = self.config.name(),
                %key,
                active = self.entries.len(),
                "subscription cancelled"
            );
        }
        key
    }

    /// Cancels every tracked subscription. Calling it again is a no-op.
    pub fn unsubscribe_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        let cancelled = self.entries.len();
        for (_, entry) in self.entries.drain() {
            entry.cancel();
        }
        tracing::debug!(
            tracker = self.config.name(),
            cancelled,
            "all subscriptions cancelled"
        );
    }

    /// Number of subscriptions currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: SubscriptionKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Keys of all tracked subscriptions, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = SubscriptionKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl Default for SubscriptionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriptionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionTracker")
            .field("label", &self.config.label)
            .field("active", &self.entries.len())
            .finish()
    }
}

impl Drop for SubscriptionTracker {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}
