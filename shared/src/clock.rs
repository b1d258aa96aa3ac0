use crate::constants::FIXED_DELTA;

/// Fixed-step clock driving the simulation.
///
/// Every tick advances simulated time by the same delta, whatever the real
/// frame time was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    delta: f32,
    ticks: u64,
    elapsed: f64,
}

impl SimulationClock {
    pub fn new(delta: f32) -> Self {
        debug_assert!(delta > 0.0, "clock delta must be positive, got {delta}");
        Self {
            delta,
            ticks: 0,
            elapsed: 0.0,
        }
    }

    /// Advances one step and returns the delta to integrate with.
    pub fn tick(&mut self) -> f32 {
        self.ticks += 1;
        self.elapsed += self.delta as f64;
        self.delta
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since the clock started.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(FIXED_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_is_constant() {
        let mut clock = SimulationClock::default();
        for _ in 0..10 {
            assert_eq!(clock.tick(), 0.016);
        }
        assert_eq!(clock.ticks(), 10);
        assert!((clock.elapsed() - 0.16).abs() < 1e-6);
    }

    #[test]
    fn test_custom_delta() {
        let mut clock = SimulationClock::new(0.5);
        clock.tick();
        clock.tick();
        assert_eq!(clock.delta(), 0.5);
        assert_eq!(clock.elapsed(), 1.0);
    }
}
