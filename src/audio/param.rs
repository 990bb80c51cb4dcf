//! Automatable parameters.
//!
//! A [`Param`] is a value that can hold, ramp linearly, ramp exponentially
//! or approach a target over time. Scheduling a new automation starts from
//! whatever value the parameter has at that moment, so a new ramp always
//! supersedes the old one without a jump.

/// Shape of the active automation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ramp {
    /// Constant value.
    Hold,
    /// Straight line to `to`, reached at `end`.
    Linear { to: f32, end: f64 },
    /// Geometric curve to `to`, reached at `end`. Both ends must share a sign
    /// and be non-zero; otherwise the ramp is linear.
    Exponential { to: f32, end: f64 },
    /// Exponential approach toward `target` that never quite arrives.
    Target { target: f32, time_constant: f32 },
}

/// A scalar driven by one automation at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    from: f32,
    start: f64,
    ramp: Ramp,
}

impl Param {
    /// A parameter holding `value`.
    pub fn new(value: f32) -> Self {
        Self {
            from: value,
            start: 0.0,
            ramp: Ramp::Hold,
        }
    }

    /// The automation currently in effect.
    #[inline]
    pub fn ramp(&self) -> Ramp {
        self.ramp
    }

    /// Value at time `t` (seconds on the audio clock).
    pub fn value_at(&self, t: f64) -> f32 {
        if t <= self.start {
            return self.from;
        }
        let since = t - self.start;
        match self.ramp {
            Ramp::Hold => self.from,
            Ramp::Linear { to, end } => {
                if t >= end {
                    return to;
                }
                let s = (since / (end - self.start)) as f32;
                self.from + (to - self.from) * s
            }
            Ramp::Exponential { to, end } => {
                if t >= end {
                    return to;
                }
                let s = (since / (end - self.start)) as f32;
                if self.from * to > 0.0 {
                    self.from * (to / self.from).powf(s)
                } else {
                    self.from + (to - self.from) * s
                }
            }
            Ramp::Target { target, time_constant } => {
                let decay = (-since / time_constant.max(1e-6) as f64).exp() as f32;
                target + (self.from - target) * decay
            }
        }
    }

    /// Jump to `value` at `now` and hold it.
    pub fn set_value(&mut self, value: f32, now: f64) {
        self.from = value;
        self.start = now;
        self.ramp = Ramp::Hold;
    }

    /// Ramp linearly from the current value to `to`, arriving at `end`.
    pub fn linear_ramp_to(&mut self, to: f32, now: f64, end: f64) {
        self.restart(now);
        self.ramp = if end > now {
            Ramp::Linear { to, end }
        } else {
            self.from = to;
            Ramp::Hold
        };
    }

    /// Ramp geometrically from the current value to `to`, arriving at `end`.
    pub fn exponential_ramp_to(&mut self, to: f32, now: f64, end: f64) {
        self.restart(now);
        self.ramp = if end > now {
            Ramp::Exponential { to, end }
        } else {
            self.from = to;
            Ramp::Hold
        };
    }

    /// Approach `target` with the given time constant (seconds).
    pub fn set_target(&mut self, target: f32, now: f64, time_constant: f32) {
        self.restart(now);
        self.ramp = Ramp::Target { target, time_constant };
    }

    fn restart(&mut self, now: f64) {
        self.from = self.value_at(now);
        self.start = now;
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp() {
        let mut p = Param::new(0.0);
        p.linear_ramp_to(0.2, 1.0, 3.0);
        assert_eq!(p.value_at(0.5), 0.0);
        assert!((p.value_at(2.0) - 0.1).abs() < 1e-6);
        assert_eq!(p.value_at(3.0), 0.2);
        assert_eq!(p.value_at(10.0), 0.2);
    }

    #[test]
    fn test_exponential_ramp() {
        let mut p = Param::new(50.0);
        p.exponential_ramp_to(200.0, 0.0, 2.0);
        // Halfway in time is the geometric mean
        assert!((p.value_at(1.0) - 100.0).abs() < 1e-3);
        assert_eq!(p.value_at(2.5), 200.0);
    }

    #[test]
    fn test_exponential_through_zero_falls_back_to_linear() {
        let mut p = Param::new(0.0);
        p.exponential_ramp_to(1.0, 0.0, 1.0);
        assert!((p.value_at(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_set_target_approaches() {
        let mut p = Param::new(0.1);
        p.set_target(0.0, 0.0, 0.1);
        let one_tc = p.value_at(0.1);
        assert!((one_tc - 0.1 * (-1.0f32).exp()).abs() < 1e-6);
        assert!(p.value_at(1.0) < 1e-5);
        assert!(p.value_at(1.0) > 0.0);
    }

    #[test]
    fn test_new_ramp_starts_from_current_value() {
        let mut p = Param::new(0.0);
        p.linear_ramp_to(1.0, 0.0, 1.0);
        p.linear_ramp_to(0.0, 0.5, 1.5);
        assert!((p.value_at(0.5) - 0.5).abs() < 1e-6);
        assert!((p.value_at(1.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_length_ramp_jumps() {
        let mut p = Param::new(3.0);
        p.linear_ramp_to(7.0, 2.0, 2.0);
        assert_eq!(p.value_at(2.0), 7.0);
        assert_eq!(p.ramp(), Ramp::Hold);
    }
}
