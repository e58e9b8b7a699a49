//! Property-based tests for backlog ordering and the single-active invariant.

use std::sync::Arc;

use pacer_core::traits::ManualClock;
use pacer_core::{PacerConfig, Priority, Signal, Timestamp};
use pacer_engine::backlog::PriorityBacklog;
use pacer_engine::PacerEngine;
use proptest::prelude::*;
use serde_json::json;
use test_fixtures::RecordingApplier;

const KINDS: [&str; 7] = [
    "undo-loop",
    "backtrack",
    "hover-repeat",
    "dwell",
    "fast-action",
    "scroll-jitter",
    "",
];

proptest! {
    #[test]
    fn backlog_stays_sorted_and_bounded(
        capacity in 1usize..12,
        priorities in prop::collection::vec(1u8..=5, 0..40),
    ) {
        let mut backlog = PriorityBacklog::new(capacity);
        for (i, p) in priorities.iter().enumerate() {
            backlog.insert(Signal::new("s", json!(null), Timestamp(i as u64), Priority(*p)));
            prop_assert!(backlog.len() <= capacity);
        }

        let entries: Vec<&Signal> = backlog.iter().collect();
        for pair in entries.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
            // FIFO within one priority.
            if pair[0].priority == pair[1].priority {
                prop_assert!(pair[0].enqueued_at < pair[1].enqueued_at);
            }
        }
        prop_assert_eq!(backlog.len(), priorities.len().min(capacity));
    }

    #[test]
    fn active_action_is_only_replaced_by_a_more_urgent_one(
        ops in prop::collection::vec((0usize..KINDS.len(), 0u64..700), 1..60),
    ) {
        let clock = ManualClock::new();
        let mut engine = PacerEngine::builder(PacerConfig::default())
            .clock(Arc::new(clock.clone()))
            .build(RecordingApplier::new())
            .unwrap();

        let mut previous: Option<(Timestamp, Timestamp, Priority)> = None;
        for (kind, gap) in ops {
            clock.advance_ms(gap);
            engine.advance();
            engine.submit(KINDS[kind], json!({}));

            let current = engine
                .active()
                .map(|a| (a.admitted_at, a.expires_at, a.priority()));
            if let (Some((prev_at, prev_expiry, prev_priority)), Some((at, _, priority))) =
                (previous, current)
            {
                // A different action that started before the old one ran out
                // must have outranked it.
                if at != prev_at && at < prev_expiry {
                    prop_assert!(priority.outranks(prev_priority));
                }
            }
            previous = current;
            prop_assert!(!engine.is_draining());
        }
    }

    #[test]
    fn every_accepted_signal_is_accounted_for(
        ops in prop::collection::vec((0usize..KINDS.len(), 0u64..400), 1..80),
    ) {
        let mut config = PacerConfig::default();
        config.intake.backlog_capacity = 3;
        let clock = ManualClock::new();
        let mut engine = PacerEngine::builder(config)
            .clock(Arc::new(clock.clone()))
            .build(RecordingApplier::new())
            .unwrap();

        for (kind, gap) in ops {
            clock.advance_ms(gap);
            engine.advance();
            engine.submit(KINDS[kind], json!({}));
            prop_assert!(engine.backlog().len() <= 3);
        }

        let c = engine.counters();
        prop_assert_eq!(c.submitted, c.accepted + c.throttled);
        prop_assert_eq!(
            c.accepted,
            c.processed + c.evicted + engine.backlog().len() as u64
        );
        prop_assert_eq!(
            c.processed,
            c.admitted + c.unresolved + c.rejected_by_safety + c.rejected_by_preemption
        );
        // At most ten admissions per sixty seconds of logical time.
        let windows = clock_windows(engine.now());
        prop_assert!(c.admitted <= 10 * windows);
    }
}

fn clock_windows(now: Timestamp) -> u64 {
    now.as_millis() / 60_000 + 1
}
