/// Fixed timestep accumulator.
/// Turns variable browser frame times into a whole number of simulation steps.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, 10)
    }

    /// Cap how many steps a single frame may run (a stalled tab must not replay minutes).
    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// Negative or non-finite frame times are ignored.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Fraction of a step left over, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_steps_per_frame() {
        let mut ts = FixedTimestep::with_max_steps(1.0 / 60.0, 4);
        assert_eq!(ts.accumulate(1.0), 4);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn ignores_bad_frame_times() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        let a = ts.alpha();
        assert!(a >= 0.0 && a <= 1.0, "alpha was {}", a);
    }
}
