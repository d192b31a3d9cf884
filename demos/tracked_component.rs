/**
 * A clock component that listens to a `Tokio` ticker and to a subject of user
 * clicks. Destroying the component cancels both subscriptions: the ticker task
 * stops and later clicks are ignored.
 *
 * Run with `RUST_LOG=rxtrack=trace` to see the tracker's log events.
 */
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use rxtrack::{
    subjects::Subject,
    subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic},
    Lifecycle, Observable, Observer, TrackSubscriptions, TrackerConfig,
};
use tokio::{sync::mpsc::channel, task, time};
use tracing_subscriber::EnvFilter;

const UNSUBSCRIBE_SIGNAL: bool = true;

struct Clock {
    ticks: Arc<AtomicU64>,
}

impl Lifecycle for Clock {
    fn on_destroy(&mut self) {
        println!("Clock destroyed after {} ticks", self.ticks.load(Ordering::SeqCst));
    }
}

fn ticker(period_ms: u64) -> Observable<u64> {
    Observable::new(move |mut o: Subscriber<u64>| {
        let (tx, mut rx) = channel(1);

        let join_handle = task::spawn(async move {
            let mut interval = time::interval(time::Duration::from_millis(period_ms));
            for i in 0.. {
                tokio::select! {
                    Some(UNSUBSCRIBE_SIGNAL) = rx.recv() => break,
                    _ = interval.tick() => o.next(i),
                }
            }
            o.complete();
            println!("Ticker task finished");
        });

        Subscription::new(
            UnsubscribeLogic::Future(Box::pin(async move {
                if tx.send(UNSUBSCRIBE_SIGNAL).await.is_err() {
                    println!("Receiver dropped.");
                }
            })),
            SubscriptionHandle::JoinTask(join_handle),
        )
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ticks = Arc::new(AtomicU64::new(0));
    let mut clock = Clock {
        ticks: Arc::clone(&ticks),
    }
    .with_subscription_tracker_config(TrackerConfig::default().with_label("clock"));

    let counter = Arc::clone(&ticks);
    clock.subscribe_next(&mut ticker(10), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let (mut clicks, mut clicks_rx) = Subject::emitter_receiver();
    clock.subscribe_next(&mut clicks_rx, |button: &'static str| {
        println!("Clicked {}", button);
    });

    clicks.next("start");
    time::sleep(time::Duration::from_millis(100)).await;
    clicks.next("stop");

    println!("Active subscriptions before destroy: {}", clock.tracker().len());
    clock.destroy();

    // Neither of these is delivered anymore.
    clicks.next("ignored");
    time::sleep(time::Duration::from_millis(50)).await;
    println!("Ticks after destroy: {}", ticks.load(Ordering::SeqCst));
}
