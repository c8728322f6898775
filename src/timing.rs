//! Fixed timestep accumulator
//!
//! Converts host frame timestamps into a whole number of simulation ticks,
//! carrying leftover time into the next frame.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick
    step: f32,
    accumulator: f32,
    /// Timestamp of the previous frame (ms), None right after a reset
    last_time: Option<f64>,
}

impl FixedTimestep {
    /// `step` is the tick length in seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Leftover time not yet consumed by a tick (seconds)
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Forget the previous timestamp and any carried time
    pub fn reset_clock(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Feed a frame timestamp (ms) and return how many ticks are due
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).max(0.0),
            None => self.step,
        };
        self.last_time = Some(now_ms);

        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        // Drop backlog the substep cap could not absorb
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut clock = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(clock.advance(12_345.0), 1);
    }

    #[test]
    fn test_fast_display_skips_ticks() {
        // 120 Hz display over a 60 Hz simulation: every other frame ticks
        let mut clock = FixedTimestep::new(1.0 / 60.0);
        clock.advance(0.0);
        let ticks: u32 = (1..=120).map(|i| clock.advance(i as f64 * 1000.0 / 120.0)).sum();
        assert!((59..=61).contains(&ticks), "ticks = {}", ticks);
    }

    #[test]
    fn test_leftover_time_carries_over() {
        let mut clock = FixedTimestep::new(1.0 / 60.0);
        clock.advance(0.0);
        // 10 ms: not enough for a tick
        assert_eq!(clock.advance(10.0), 0);
        // another 10 ms: 20 ms accumulated -> one tick
        assert_eq!(clock.advance(20.0), 1);
        assert!(clock.pending() > 0.0 && clock.pending() < clock.step());
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FixedTimestep::new(1.0 / 60.0);
        clock.advance(0.0);
        // 5 s hitch: clamped to 0.1 s, about 6 ticks
        let ticks = clock.advance(5_000.0);
        assert!((5..=6).contains(&ticks), "ticks = {}", ticks);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut clock = FixedTimestep::new(1.0 / 240.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(100.0), MAX_SUBSTEPS);
        assert!(clock.pending() <= clock.step());
    }

    #[test]
    fn test_backwards_time_is_ignored() {
        let mut clock = FixedTimestep::new(1.0 / 60.0);
        clock.advance(1_000.0);
        assert_eq!(clock.advance(500.0), 0);
    }

    #[test]
    fn test_reset_clock() {
        let mut clock = FixedTimestep::new(1.0 / 60.0);
        clock.advance(0.0);
        clock.advance(10.0);
        clock.reset_clock();
        assert_eq!(clock.pending(), 0.0);
        assert_eq!(clock.advance(99_999.0), 1);
    }

    proptest! {
        #[test]
        fn prop_accumulator_stays_bounded(deltas in prop::collection::vec(0.0f64..250.0, 1..64)) {
            let mut clock = FixedTimestep::new(1.0 / 60.0);
            let mut now = 0.0;
            clock.advance(now);
            for d in deltas {
                now += d;
                let ticks = clock.advance(now);
                prop_assert!(ticks <= MAX_SUBSTEPS);
                prop_assert!(clock.pending() >= 0.0);
                prop_assert!(clock.pending() < MAX_FRAME_DT + clock.step());
            }
        }
    }
}
