use std::time::Instant;

use crate::defs::MAX_FRAME_DT;

/// Turns per-frame timestamps into elapsed seconds.
#[derive(Debug, Default)]
pub struct FrameClock {
    prev: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, 0 on the first call, capped at
    /// [`MAX_FRAME_DT`] so a stalled window does not fling the player.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let dt = match self.prev {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.prev = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero_then_elapsed() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(t0), 0.0);
        let dt = clock.tick(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-9);
    }

    #[test]
    fn long_stall_is_capped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(t0);
        assert_eq!(clock.tick(t0 + Duration::from_secs(5)), MAX_FRAME_DT);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(t0 + Duration::from_millis(50));
        assert_eq!(clock.tick(t0), 0.0);
    }
}
