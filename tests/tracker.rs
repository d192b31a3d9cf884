mod custom_error;
mod generate_observable;
mod register_emissions;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use custom_error::CustomError;
use generate_observable::{generate_u32_observable, generate_u32_task_observable};
use register_emissions::Emissions;
use rstest::rstest;
use rxtrack::subjects::Subject;
use rxtrack::{ObservableExt, Observer, SubscriptionTracker};

#[rstest]
#[case(0, 0)]
#[case(1, 0)]
#[case(5, 2)]
#[case(8, 8)]
fn active_count_matches_outstanding_subscriptions(#[case] subscribed: usize, #[case] cancelled: usize) {
    let (_stx, mut srx) = Subject::<i32>::emitter_receiver();
    let mut tracker = SubscriptionTracker::new();

    let keys: Vec<_> = (0..subscribed)
        .map(|_| tracker.subscribe_next(&mut srx, |_| {}))
        .collect();
    assert_eq!(tracker.len(), subscribed);
    assert_eq!(srx.len(), subscribed);

    for key in keys.iter().take(cancelled) {
        tracker.unsubscribe(*key);
    }

    assert_eq!(tracker.len(), subscribed - cancelled);
    assert_eq!(srx.len(), subscribed - cancelled);
}

#[test]
fn unsubscribe_all_is_idempotent() {
    let (_stx, mut srx) = Subject::<i32>::emitter_receiver();
    let mut tracker = SubscriptionTracker::new();

    for _ in 0..3 {
        tracker.subscribe_next(&mut srx, |_| {});
    }

    tracker.unsubscribe_all();
    assert!(tracker.is_empty());
    assert!(srx.is_empty());

    tracker.unsubscribe_all();
    tracker.unsubscribe_all();
    assert!(tracker.is_empty());
}

#[test]
fn two_streams_then_teardown() {
    let a = Emissions::new();
    let b = Emissions::new();
    let (mut a_tx, mut a_rx) = Subject::emitter_receiver();
    let (mut b_tx, mut b_rx) = Subject::emitter_receiver();

    let mut tracker = SubscriptionTracker::new();
    let a_key = tracker.subscribe(&mut a_rx, a.subscriber());
    tracker.subscribe(&mut b_rx, b.subscriber());
    assert_eq!(tracker.len(), 2);

    a_tx.next(1);
    b_tx.next(10);

    tracker.unsubscribe(a_key);
    assert_eq!(tracker.len(), 1);

    a_tx.next(2);
    b_tx.next(20);
    assert_eq!(a.values(), vec![1]);
    assert_eq!(b.values(), vec![10, 20]);

    drop(tracker);

    b_tx.next(30);
    b_tx.complete();
    assert_eq!(b.values(), vec![10, 20]);
    assert_eq!(b.completes(), 0);
    assert!(b_rx.is_empty());
}

#[test]
fn errors_reach_the_error_callback() {
    let emissions = Emissions::new();
    let (mut stx, mut srx) = Subject::emitter_receiver();
    let mut tracker = SubscriptionTracker::new();

    tracker.subscribe(&mut srx, emissions.subscriber());
    stx.next(1);
    stx.error(Arc::new(CustomError));
    stx.next(2);

    assert_eq!(emissions.values(), vec![1]);
    assert_eq!(emissions.errors(), vec!["Custom error occurred".to_string()]);
    assert_eq!(emissions.completes(), 0);
}

#[test]
fn operators_compose_with_tracking() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_c = Arc::clone(&seen);
    let (mut stx, srx) = Subject::<i32>::emitter_receiver();
    let mut tracker = SubscriptionTracker::new();

    let key = tracker.subscribe_next(
        &mut srx.clone().filter(|v| *v > 0).map(|v| v * 100),
        move |v| seen_c.lock().unwrap().push(v),
    );

    stx.next(-1);
    stx.next(2);
    tracker.unsubscribe(key);
    stx.next(3);

    assert_eq!(*seen.lock().unwrap(), vec![200]);
    assert!(srx.is_empty());
}

#[test]
fn unsubscribe_silences_thread_observable_immediately() {
    let stopped = Arc::new(AtomicBool::new(false));
    let mut observable = generate_u32_observable(10_000, Arc::clone(&stopped));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_c = Arc::clone(&seen);
    let mut tracker = SubscriptionTracker::new();
    let key = tracker.subscribe_next(&mut observable, move |v| seen_c.lock().unwrap().push(v));

    std::thread::sleep(Duration::from_millis(30));
    tracker.unsubscribe(key);
    let delivered = seen.lock().unwrap().len();

    std::thread::sleep(Duration::from_millis(50));
    assert!(stopped.load(Ordering::SeqCst));
    // A callback already running on the producer thread may still finish.
    assert!(seen.lock().unwrap().len() <= delivered + 1);
    assert!(delivered > 0);
}

#[tokio::test]
async fn unsubscribe_stops_task_observable() {
    let stopped = Arc::new(AtomicBool::new(false));
    let mut observable = generate_u32_task_observable(10_000, Arc::clone(&stopped));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_c = Arc::clone(&seen);
    let mut tracker = SubscriptionTracker::new();
    tracker.subscribe_next(&mut observable, move |v| seen_c.lock().unwrap().push(v));

    tokio::time::sleep(Duration::from_millis(30)).await;
    tracker.unsubscribe_all();
    let delivered = seen.lock().unwrap().len();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(stopped.load(Ordering::SeqCst));
    assert_eq!(seen.lock().unwrap().len(), delivered);
}
