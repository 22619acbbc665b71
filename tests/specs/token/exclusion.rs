//! Talk token specs
//!
//! At most one caller holds the token between request_talk and end_talk.

use crate::prelude::*;

#[test]
fn second_requester_waits_for_end_talk() {
    let coord = table(5);
    let start = Arc::new(Barrier::new(2));
    let holders = Arc::new(AtomicUsize::new(0));

    let talkers: Vec<_> = (0..2)
        .map(|_| {
            let start = Arc::clone(&start);
            let holders = Arc::clone(&holders);
            spawn(&coord, move |coord| {
                start.wait();
                coord.request_talk().unwrap();
                holders.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    // Exactly one gets through; the other is parked on the busy token
    assert!(eventually(|| holders.load(Ordering::SeqCst) == 1
        && coord.stats().token_busy >= 1));
    thread::sleep(Duration::from_millis(30));
    assert_eq!(holders.load(Ordering::SeqCst), 1);
    assert_eq!(talkers.iter().filter(|t| t.is_finished()).count(), 1);

    coord.end_talk().unwrap();
    for talker in talkers {
        talker.join().unwrap();
    }

    assert_eq!(holders.load(Ordering::SeqCst), 2);
    assert!(coord.is_talking());
    coord.end_talk().unwrap();
    assert!(!coord.is_talking());
}

#[test]
fn token_never_has_two_holders() {
    for mode in WAKE_MODES {
        let coord = table_with(CoordinatorConfig::new(5).with_wake_mode(mode));
        let speaking = Arc::new(AtomicUsize::new(0));
        let collisions = Arc::new(AtomicUsize::new(0));

        let talkers: Vec<_> = (0..6)
            .map(|_| {
                let speaking = Arc::clone(&speaking);
                let collisions = Arc::clone(&collisions);
                spawn(&coord, move |coord| {
                    for _ in 0..200 {
                        coord.request_talk().unwrap();
                        if speaking.fetch_add(1, Ordering::SeqCst) != 0 {
                            collisions.fetch_add(1, Ordering::SeqCst);
                        }
                        thread::yield_now();
                        speaking.fetch_sub(1, Ordering::SeqCst);
                        coord.end_talk().unwrap();
                    }
                })
            })
            .collect();
        for talker in talkers {
            talker.join().unwrap();
        }

        assert_eq!(collisions.load(Ordering::SeqCst), 0, "{mode:?}");
        let stats = coord.stats();
        assert_eq!(stats.token_grants, 1200);
        assert_eq!(stats.token_releases, 1200);
        assert!(!coord.is_talking());
    }
}

#[test]
fn talking_and_eating_interleave_without_breaking_either_invariant() {
    let actors = 5;
    let coord = table(actors);
    let speaking = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (1..=actors)
        .map(|id| {
            let speaking = Arc::clone(&speaking);
            spawn(&coord, move |coord| {
                for _ in 0..100 {
                    coord.pick_up(id).unwrap();
                    coord.put_down(id).unwrap();

                    // Talk only while not active
                    coord.request_talk().unwrap();
                    assert_eq!(speaking.fetch_add(1, Ordering::SeqCst), 0);
                    speaking.fetch_sub(1, Ordering::SeqCst);
                    coord.end_talk().unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    coord.check_invariants().unwrap();
    assert!(!coord.is_talking());
}
