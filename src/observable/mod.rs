//! The `observable` module provides the cold stream type consumed by the
//! subscription tracker, together with the `map` and `filter` operators.

use std::sync::{Arc, Mutex};

use crate::observer::Observer;
use crate::subscription::subscribe::{Subscribeable, Subscriber, Subscription};

/// The `Observable` struct represents a source of values that can be observed
/// and transformed.
///
/// Observables are cold: nothing runs until `subscribe` is called, and every
/// subscription runs the subscribe function again.
///
/// # Example: asynchronous `Observable` with `unsubscribe`
///
/// Emits values from an OS thread and returns a `Subscription` whose unsubscribe
/// logic tells the thread to stop.
///
/// ```no_run
/// use std::sync::{
///     atomic::{AtomicBool, Ordering},
///     Arc,
/// };
/// use std::time::Duration;
///
/// use rxtrack::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use rxtrack::{Observable, Observer, Subscribeable, Unsubscribeable};
///
/// let mut observable = Observable::new(|mut o: Subscriber<u32>| {
///     let done = Arc::new(AtomicBool::new(false));
///     let done_c = Arc::clone(&done);
///
///     let join_handle = std::thread::spawn(move || {
///         for i in 0..=10000 {
///             if done.load(Ordering::SeqCst) {
///                 break;
///             }
///             o.next(i);
///             std::thread::sleep(Duration::from_millis(1));
///         }
///         o.complete();
///     });
///
///     Subscription::new(
///         UnsubscribeLogic::Logic(Box::new(move || done_c.store(true, Ordering::SeqCst))),
///         SubscriptionHandle::JoinThread(join_handle),
///     )
/// });
///
/// let subscription = observable.subscribe(Subscriber::on_next(|v| println!("Emitted {}", v)));
/// std::thread::sleep(Duration::from_millis(20));
/// subscription.unsubscribe();
/// ```
pub struct Observable<T> {
    subscribe_fn: Box<dyn FnMut(Subscriber<T>) -> Subscription + Send + Sync>,
}

impl<T> Observable<T> {
    /// Creates a new `Observable` from the function that runs on every subscription.
    ///
    /// The function receives the `Subscriber` to emit into and returns the
    /// `Subscription` describing how to stop and how to await the started work.
    pub fn new(sf: impl FnMut(Subscriber<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Observable {
            subscribe_fn: Box::new(sf),
        }
    }
}

/// Operators available on every `Subscribeable` source.
pub trait ObservableExt<T: 'static>: Subscribeable<ObsType = T> {
    /// Transforms every emitted value with `f`.
    fn map<U, F>(mut self, f: F) -> Observable<U>
    where
        Self: Sized + Send + Sync + 'static,
        F: (FnOnce(T) -> U) + Copy + Sync + Send + 'static,
        U: 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    let t = f(v);
                    o_shared.lock().unwrap().next(t);
                },
                move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                },
                move || {
                    o_cloned_c.lock().unwrap().complete();
                },
            );
            self.subscribe(u)
        })
    }

    /// Emits only the values for which `predicate` returns `true`.
    fn filter<P>(mut self, predicate: P) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        P: (FnOnce(&T) -> bool) + Copy + Sync + Send + 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    if predicate(&v) {
                        o_shared.lock().unwrap().next(v);
                    }
                },
                move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                },
                move || {
                    o_cloned_c.lock().unwrap().complete();
                },
            );
            self.subscribe(u)
        })
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&mut self, v: Subscriber<Self::ObsType>) -> Subscription {
        (self.subscribe_fn)(v)
    }
}

impl<O, T: 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}
