//! Property tests: elapsed time comes from timestamps, not from tick counts.

use std::sync::Arc;

use proptest::prelude::*;
use studydash_core::{ManualClock, MemoryStore, TimerConfig, TimerEngine, TimerMode};

fn stopwatch(clock: &ManualClock) -> TimerEngine<MemoryStore> {
    TimerEngine::new(
        MemoryStore::new(),
        Arc::new(clock.clone()),
        &TimerConfig {
            mode: TimerMode::Stopwatch,
            ..TimerConfig::default()
        },
    )
}

proptest! {
    /// Each segment is (running ms, paused ms, pump interval ms).
    #[test]
    fn elapsed_independent_of_tick_frequency(
        segments in prop::collection::vec((0i64..20_000, 0i64..50_000, 1i64..5_000), 1..8)
    ) {
        let ticked_clock = ManualClock::new(0);
        let quiet_clock = ManualClock::new(0);
        let mut ticked = stopwatch(&ticked_clock);
        let mut quiet = stopwatch(&quiet_clock);
        let mut running_ms = 0;

        for &(run, paused, every) in &segments {
            ticked.start();
            quiet.start();

            let mut left = run;
            while left > 0 {
                let step = every.min(left);
                ticked_clock.advance_ms(step);
                ticked.pump().unwrap();
                left -= step;
            }
            quiet_clock.advance_ms(run);
            running_ms += run;

            ticked.pause().unwrap();
            quiet.pause().unwrap();
            ticked_clock.advance_ms(paused);
            quiet_clock.advance_ms(paused);
        }

        prop_assert_eq!(ticked.display_secs(), quiet.display_secs());

        // Each pause truncates at most one partial second.
        let upper = (running_ms / 1000) as u64;
        let lower = upper.saturating_sub(segments.len() as u64);
        prop_assert!(quiet.display_secs() <= upper);
        prop_assert!(quiet.display_secs() >= lower);
    }

    /// Whole-second running segments add up exactly.
    #[test]
    fn whole_second_segments_sum_exactly(
        segments in prop::collection::vec((0i64..600, 0i64..600_000), 1..10)
    ) {
        let clock = ManualClock::new(0);
        let mut engine = stopwatch(&clock);
        let mut expected = 0;

        for &(run_secs, paused_ms) in &segments {
            engine.start();
            clock.advance_secs(run_secs);
            engine.pause().unwrap();
            clock.advance_ms(paused_ms);
            expected += run_secs as u64;
        }
        prop_assert_eq!(engine.display_secs(), expected);
    }
}
