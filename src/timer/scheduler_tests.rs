//! Tests for timer/scheduler

use super::*;
use proptest::prelude::*;

fn drain(scheduler: &mut Scheduler<&'static str>, until: u64) -> Vec<&'static str> {
    let mut fired = Vec::new();
    while let Some((_, task)) = scheduler.pop_due(until) {
        fired.push(task);
    }
    scheduler.advance_to(until);
    fired
}

#[test]
fn test_fires_in_due_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(200, "hide");
    scheduler.schedule(20, "show");

    assert_eq!(drain(&mut scheduler, 19), Vec::<&str>::new());
    assert_eq!(drain(&mut scheduler, 20), vec!["show"]);
    assert_eq!(scheduler.now(), 20);
    assert_eq!(drain(&mut scheduler, 500), vec!["hide"]);
    assert_eq!(scheduler.now(), 500);
}

#[test]
fn test_same_instant_fires_in_arming_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(10, "a");
    scheduler.schedule(10, "b");
    scheduler.schedule(10, "c");

    assert_eq!(drain(&mut scheduler, 10), vec!["a", "b", "c"]);
}

#[test]
fn test_cancelled_timer_never_fires() {
    let mut scheduler = Scheduler::new();
    let id = scheduler.schedule(20, "show");

    assert!(scheduler.is_pending(id));
    assert_eq!(scheduler.cancel(id), Some("show"));
    assert_eq!(scheduler.cancel(id), None);
    assert!(!scheduler.is_pending(id));
    assert_eq!(scheduler.next_due(), None);
    assert!(drain(&mut scheduler, 100).is_empty());
}

#[test]
fn test_delay_is_relative_to_current_time() {
    let mut scheduler = Scheduler::new();
    scheduler.advance_to(1_000);
    scheduler.schedule(5, "later");

    assert_eq!(scheduler.next_due(), Some(1_005));
}

#[test]
fn test_clock_never_moves_backwards() {
    let mut scheduler: Scheduler<()> = Scheduler::new();
    scheduler.advance_to(50);
    scheduler.advance_to(10);
    assert_eq!(scheduler.now(), 50);
}

// Whatever the arming order, tasks come out sorted by due time.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_pop_order_is_sorted(delays in prop::collection::vec(0u64..1_000, 1..30)) {
        let mut scheduler = Scheduler::new();
        for delay in &delays {
            scheduler.schedule(*delay, *delay);
        }

        let mut fired = Vec::new();
        while let Some((_, delay)) = scheduler.pop_due(u64::MAX) {
            fired.push(delay);
        }

        let mut expected = delays.clone();
        expected.sort();
        prop_assert_eq!(fired, expected);
        prop_assert_eq!(scheduler.pending(), 0);
    }
}
