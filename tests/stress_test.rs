/*!
 * Broker Stress Tests
 * Concurrent producer/consumer stress over the DashMap-backed store
 */

use msgq_broker::queue::types::MAX_QUEUE_CAPACITY;
use msgq_broker::{Broker, QueueError, QueueStore};
use serial_test::serial;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

const PRODUCERS: usize = 8;
const MESSAGES_PER_PRODUCER: usize = 500;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial]
async fn test_concurrent_pushes_lose_nothing() {
    let store = Arc::new(QueueStore::new());
    store.create("orders", Some(MAX_QUEUE_CAPACITY)).unwrap();

    let mut handles = vec![];
    for producer in 0..PRODUCERS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            for i in 0..MESSAGES_PER_PRODUCER {
                let priority = (i % 5) as u8;
                store
                    .push("orders", format!("p{}-m{}", producer, i), priority)
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let expected = PRODUCERS * MESSAGES_PER_PRODUCER;
    let stats = store.stats("orders").unwrap();
    assert_eq!(stats.length, expected);
    assert_eq!(store.store_stats().messages_pushed, expected as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial]
async fn test_concurrent_producers_and_consumers_drain_everything() {
    let broker = Broker::new();
    broker.store().create("jobs", Some(MAX_QUEUE_CAPACITY)).unwrap();

    let produced = Arc::new(AtomicU64::new(0));
    let consumed = Arc::new(AtomicU64::new(0));
    let producers_done = Arc::new(AtomicBool::new(false));

    let mut producer_handles = vec![];
    for producer in 0..PRODUCERS {
        let broker = broker.clone();
        let produced = Arc::clone(&produced);
        producer_handles.push(tokio::spawn(async move {
            for i in 0..MESSAGES_PER_PRODUCER {
                let priority = ((producer + i) % 5) as u8;
                broker
                    .add_message("jobs", format!("p{}-m{}", producer, i), priority)
                    .unwrap();
                produced.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    let mut consumer_handles = vec![];
    for _ in 0..4 {
        let broker = broker.clone();
        let consumed = Arc::clone(&consumed);
        let producers_done = Arc::clone(&producers_done);
        consumer_handles.push(tokio::spawn(async move {
            loop {
                // Read the flag before popping: an Empty observed after the
                // last producer finished is final, one observed before is not
                let was_done = producers_done.load(Ordering::Acquire);
                match broker.get_message("jobs") {
                    Ok(_) => {
                        consumed.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(QueueError::Empty(_)) => {
                        if was_done {
                            break;
                        }
                        tokio::task::yield_now().await;
                    }
                    Err(e) => panic!("unexpected consumer error: {}", e),
                }
            }
        }));
    }

    for handle in producer_handles {
        handle.await.unwrap();
    }
    producers_done.store(true, Ordering::Release);
    for handle in consumer_handles {
        handle.await.unwrap();
    }

    let expected = (PRODUCERS * MESSAGES_PER_PRODUCER) as u64;
    assert_eq!(produced.load(Ordering::Relaxed), expected);
    assert_eq!(consumed.load(Ordering::Relaxed), expected);
    assert!(matches!(
        broker.get_message("jobs").unwrap_err(),
        QueueError::Empty(_)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial]
async fn test_concurrent_create_same_name_single_winner() {
    let store = Arc::new(QueueStore::new());
    let wins = Arc::new(AtomicU64::new(0));
    let conflicts = Arc::new(AtomicU64::new(0));

    let mut handles = vec![];
    for _ in 0..100 {
        let store = Arc::clone(&store);
        let wins = Arc::clone(&wins);
        let conflicts = Arc::clone(&conflicts);
        handles.push(tokio::spawn(async move {
            match store.create("contested", None) {
                Ok(()) => wins.fetch_add(1, Ordering::Relaxed),
                Err(QueueError::AlreadyExists(_)) => conflicts.fetch_add(1, Ordering::Relaxed),
                Err(e) => panic!("unexpected create error: {}", e),
            };
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(wins.load(Ordering::Relaxed), 1);
    assert_eq!(conflicts.load(Ordering::Relaxed), 99);
    assert_eq!(store.queue_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial]
async fn test_random_fanout_preserves_per_queue_counts() {
    let store = Arc::new(QueueStore::new());
    let queue_names: Vec<String> = (0..8).map(|i| format!("queue-{}", i)).collect();
    for name in &queue_names {
        store.create(name, Some(MAX_QUEUE_CAPACITY)).unwrap();
    }

    let sent: Arc<Vec<AtomicU64>> =
        Arc::new((0..queue_names.len()).map(|_| AtomicU64::new(0)).collect());

    let mut handles = vec![];
    for producer in 0..100 {
        let store = Arc::clone(&store);
        let names = queue_names.clone();
        let sent = Arc::clone(&sent);
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                let target = rand::random::<usize>() % names.len();
                store
                    .push(&names[target], format!("p{}-m{}", producer, i), (i % 5) as u8)
                    .unwrap();
                sent[target].fetch_add(1, Ordering::Relaxed);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for (i, name) in queue_names.iter().enumerate() {
        let stats = store.stats(name).unwrap();
        assert_eq!(stats.length as u64, sent[i].load(Ordering::Relaxed));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[serial]
async fn test_delete_never_races_push_into_limbo() {
    let store = Arc::new(QueueStore::new());
    let pushed_ok = Arc::new(AtomicU64::new(0));
    let not_found = Arc::new(AtomicU64::new(0));

    let lifecycle_store = Arc::clone(&store);
    let lifecycle = tokio::spawn(async move {
        for _ in 0..500 {
            // Recreating under the same name must never corrupt in-flight pushes
            let _ = lifecycle_store.create("flappy", Some(MAX_QUEUE_CAPACITY));
            tokio::task::yield_now().await;
            let _ = lifecycle_store.delete("flappy");
        }
    });

    let mut pushers = vec![];
    for producer in 0..4 {
        let store = Arc::clone(&store);
        let pushed_ok = Arc::clone(&pushed_ok);
        let not_found = Arc::clone(&not_found);
        pushers.push(tokio::spawn(async move {
            for i in 0..500 {
                match store.push("flappy", format!("p{}-m{}", producer, i), 2) {
                    Ok(_) => pushed_ok.fetch_add(1, Ordering::Relaxed),
                    Err(QueueError::NotFound(_)) => not_found.fetch_add(1, Ordering::Relaxed),
                    Err(e) => panic!("unexpected push error: {}", e),
                };
                tokio::task::yield_now().await;
            }
        }));
    }

    lifecycle.await.unwrap();
    for handle in pushers {
        handle.await.unwrap();
    }

    // Every push either landed in a live queue or saw a clean NotFound
    let total = pushed_ok.load(Ordering::Relaxed) + not_found.load(Ordering::Relaxed);
    assert_eq!(total, 4 * 500);

    // Any survivor queue is still fully usable
    if store.contains("flappy") {
        store.push("flappy", "postscript".to_string(), 0).unwrap();
        assert!(store.pop("flappy").unwrap().is_some());
    }
}
