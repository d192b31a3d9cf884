use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use rxtrack::{
    subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic},
    Observable, Observer,
};

/// Emits `0..=end` from an OS thread, one value per millisecond, until unsubscribed.
///
/// `stopped` is set once the producer thread has left its emit loop.
pub fn generate_u32_observable(end: u32, stopped: Arc<AtomicBool>) -> Observable<u32> {
    Observable::new(move |mut o: Subscriber<_>| {
        let done = Arc::new(AtomicBool::new(false));
        let done_c = Arc::clone(&done);
        let stopped = Arc::clone(&stopped);

        let jh = std::thread::spawn(move || {
            for i in 0..=end {
                if done.load(Ordering::SeqCst) {
                    break;
                }
                o.next(i);
                // Important. Put an await point after each emit.
                std::thread::sleep(Duration::from_millis(1));
            }
            o.complete();
            stopped.store(true, Ordering::SeqCst);
        });

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                done_c.store(true, Ordering::SeqCst);
            })),
            SubscriptionHandle::JoinThread(jh),
        )
    })
}

/// Same as `generate_u32_observable` but runs on a `Tokio` task and is stopped
/// through a channel from `UnsubscribeLogic::Future`.
pub fn generate_u32_task_observable(end: u32, stopped: Arc<AtomicBool>) -> Observable<u32> {
    Observable::new(move |mut o: Subscriber<_>| {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
        let stopped = Arc::clone(&stopped);

        let jh = tokio::task::spawn(async move {
            for i in 0..=end {
                if rx.try_recv().is_ok() {
                    break;
                }
                o.next(i);
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            o.complete();
            stopped.store(true, Ordering::SeqCst);
        });

        Subscription::new(
            UnsubscribeLogic::Future(Box::pin(async move {
                if tx.send(()).await.is_err() {
                    eprintln!("receiver dropped");
                }
            })),
            SubscriptionHandle::JoinTask(jh),
        )
    })
}
