use super::*;

fn store(limit: u32) -> (InMemoryQuotaStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let store = InMemoryQuotaStore::with_clock(limit, Duration::from_secs(24 * 3600), clock.clone());
    (store, clock)
}

#[test]
fn unknown_client_has_full_quota() {
    let (store, _) = store(5);
    assert_eq!(store.remaining("10.0.0.1"), 5);
    assert!(store.check("10.0.0.1"));
    assert_eq!(store.limit(), 5);
}

#[test]
fn check_fails_once_limit_is_recorded() {
    let (store, _) = store(3);
    for expected in [2, 1, 0] {
        assert!(store.check("a"));
        store.record("a");
        assert_eq!(store.remaining("a"), expected);
    }
    assert!(!store.check("a"));
    assert!(store.check("b"));
}

#[test]
fn check_alone_does_not_consume() {
    let (store, _) = store(2);
    for _ in 0..10 {
        assert!(store.check("a"));
    }
    assert_eq!(store.remaining("a"), 2);
}

#[test]
fn window_resets_after_period() {
    let (store, clock) = store(1);
    assert!(store.check("a"));
    store.record("a");
    assert!(!store.check("a"));

    clock.advance(Duration::from_secs(23 * 3600));
    assert!(!store.check("a"));
    assert_eq!(store.remaining("a"), 0);

    clock.advance(Duration::from_secs(3600));
    assert_eq!(store.remaining("a"), 1);
    assert!(store.check("a"));
}

#[test]
fn try_acquire_reserves_up_to_limit() {
    let (store, _) = store(2);
    assert!(store.try_acquire("a"));
    assert!(store.try_acquire("a"));
    assert!(!store.try_acquire("a"));
    assert_eq!(store.remaining("a"), 0);
    assert!(store.try_acquire("b"));
}

#[test]
fn release_refunds_a_reserved_slot() {
    let (store, _) = store(1);
    assert!(store.try_acquire("a"));
    store.release("a");
    assert_eq!(store.remaining("a"), 1);
    assert!(store.try_acquire("a"));

    store.release("nobody");
    assert_eq!(store.remaining("nobody"), 1);
}

#[test]
fn concurrent_acquires_never_exceed_limit() {
    let (store, _) = store(3);
    let store = Arc::new(store);
    let granted: u32 = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                scope.spawn(move || u32::from(store.try_acquire("a")))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });
    assert_eq!(granted, 3);
    assert_eq!(store.remaining("a"), 0);
}
