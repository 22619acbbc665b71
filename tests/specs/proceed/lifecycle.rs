//! Actor lifecycle specs
//!
//! Each actor moves THINKING -> HUNGRY -> ACTIVE -> THINKING and never skips
//! a state; an uncontended actor always gets through.

use crate::prelude::*;

/// Legal successor within the think/hungry/active cycle
fn follows(from: ActorState, to: ActorState) -> bool {
    matches!(
        (from, to),
        (ActorState::Thinking, ActorState::Hungry)
            | (ActorState::Hungry, ActorState::Active)
            | (ActorState::Active, ActorState::Thinking)
    )
}

#[test]
fn uncontended_actor_reaches_active_every_cycle() {
    let coord = table(5);

    for _ in 0..100 {
        coord.pick_up(3).unwrap();
        assert_eq!(coord.state(3).unwrap(), ActorState::Active);
        coord.put_down(3).unwrap();
    }

    let stats = coord.stats();
    assert_eq!(stats.grants, 100);
    assert_eq!(stats.deferrals, 0);
}

#[test]
fn actor_whose_neighbours_keep_cycling_still_gets_through() {
    let coord = table(3);
    let stop = Arc::new(AtomicBool::new(false));

    let neighbours: Vec<_> = [1, 3]
        .into_iter()
        .map(|id| {
            let stop = Arc::clone(&stop);
            spawn(&coord, move |coord| {
                while !stop.load(Ordering::SeqCst) {
                    coord.pick_up(id).unwrap();
                    thread::sleep(Duration::from_micros(200));
                    coord.put_down(id).unwrap();
                    thread::sleep(Duration::from_micros(200));
                }
            })
        })
        .collect();

    let middle = spawn(&coord, |coord| {
        for _ in 0..20 {
            coord.pick_up(2).unwrap();
            coord.put_down(2).unwrap();
        }
    });
    middle.join().unwrap();

    stop.store(true, Ordering::SeqCst);
    for neighbour in neighbours {
        neighbour.join().unwrap();
    }
    coord.check_invariants().unwrap();
}

#[test]
fn observed_states_follow_the_cycle_under_contention() {
    let actors = 5;
    let rounds = 50;
    let coord = table(actors);

    let handles: Vec<_> = (1..=actors)
        .map(|id| {
            spawn(&coord, move |coord| {
                for _ in 0..rounds {
                    coord.pick_up(id).unwrap();
                    coord.put_down(id).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for id in 1..=actors {
        let mut previous = ActorState::Thinking;
        let trajectory = coord.trajectory(id);
        assert_eq!(trajectory.len(), rounds * 3, "actor {id}");
        for state in trajectory {
            assert!(follows(previous, state), "actor {id}: {previous} -> {state}");
            previous = state;
        }
        assert_eq!(previous, ActorState::Thinking);
    }
}

#[test]
fn history_replay_never_shows_active_neighbours() {
    let actors = 4;
    let coord = table(actors);

    let handles: Vec<_> = (1..=actors)
        .map(|id| {
            spawn(&coord, move |coord| {
                for _ in 0..100 {
                    coord.pick_up(id).unwrap();
                    coord.put_down(id).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut states = vec![ActorState::Thinking; actors];
    let history = coord.history();
    assert!(history.windows(2).all(|w| w[0].seq + 1 == w[1].seq));
    for record in history {
        let (Some(actor), Some(state)) = (record.event.actor(), record.event.resulting_state())
        else {
            continue;
        };
        states[actor.index()] = state;
        if state == ActorState::Active {
            for neighbour in [actor.left(actors), actor.right(actors)] {
                assert_ne!(
                    states[neighbour.index()],
                    ActorState::Active,
                    "seq {}: {actor} active beside {neighbour}",
                    record.seq
                );
            }
        }
    }
}
