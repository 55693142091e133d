/*
Breakpoint Automation
=====================

A ramp is a list of (time, value) breakpoints joined by straight lines,
the same model as an AudioParam driven by setValueAtTime followed by
linearRampToValueAtTime calls:

  value
    1 ┤      ●────────●
      │     ╱          ╲
    0 ●────╱            ●───── (silent after `length`)
      0   attack     fall    length

Before the first breakpoint the first value holds; between the last
breakpoint and `length` the last value holds; from `length` on the ramp is
finished and reads 0.
*/

#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    points: Vec<(f32, f32)>,
    length: f32,
}

impl Ramp {
    /// Start at `value` at time zero. The ramp ends at its last breakpoint
    /// unless [`until`](Self::until) extends it.
    pub fn starting_at(value: f32) -> Self {
        Self {
            points: vec![(0.0, value)],
            length: 0.0,
        }
    }

    /// Hold 1.0 for `seconds`, then stop.
    pub fn gate(seconds: f32) -> Self {
        Self::starting_at(1.0).until(seconds)
    }

    /// Add a linear segment ending at `value` at `time` seconds.
    ///
    /// Times earlier than the previous breakpoint are moved up to it, so the
    /// segment becomes a jump.
    pub fn line_to(mut self, time: f32, value: f32) -> Self {
        let last = self.points.last().map_or(0.0, |p| p.0);
        let time = time.max(last);
        self.points.push((time, value));
        self.length = self.length.max(time);
        self
    }

    /// Stop the ramp at `seconds` (never earlier than its last breakpoint).
    pub fn until(mut self, seconds: f32) -> Self {
        let last = self.points.last().map_or(0.0, |p| p.0);
        self.length = seconds.max(last);
        self
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn value_at(&self, time: f32) -> f32 {
        if time >= self.length {
            return 0.0;
        }

        let mut previous = self.points[0];
        for &(t, v) in &self.points {
            if time < t {
                let span = t - previous.0;
                if span <= 0.0 {
                    return v;
                }
                let progress = (time - previous.0) / span;
                return previous.1 + (v - previous.1) * progress;
            }
            previous = (t, v);
        }
        previous.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_then_fall() {
        let ramp = Ramp::starting_at(0.0)
            .line_to(0.2, 1.0)
            .line_to(1.5, 0.0)
            .until(2.0);

        assert_eq!(ramp.value_at(0.0), 0.0);
        assert!((ramp.value_at(0.1) - 0.5).abs() < 1e-6);
        assert_eq!(ramp.value_at(0.2), 1.0);
        assert!(ramp.value_at(1.0) < 1.0);
        assert_eq!(ramp.value_at(1.7), 0.0);
        assert_eq!(ramp.value_at(2.0), 0.0);
        assert_eq!(ramp.length(), 2.0);
    }

    #[test]
    fn gate_holds_then_stops() {
        let ramp = Ramp::gate(1.0);
        assert_eq!(ramp.value_at(0.0), 1.0);
        assert_eq!(ramp.value_at(0.999), 1.0);
        assert_eq!(ramp.value_at(1.0), 0.0);
    }

    #[test]
    fn backwards_breakpoint_becomes_a_jump() {
        let ramp = Ramp::starting_at(0.0).line_to(0.5, 1.0).line_to(0.3, 0.0).until(1.0);
        assert_eq!(ramp.value_at(0.6), 0.0);
        assert!(ramp.value_at(0.49) > 0.9);
    }
}
