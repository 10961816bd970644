//! Time helpers shared by every looping effect on the map.
//!
//! A [`TimedCycle`] answers "where inside its active window is this effect at
//! time `t`?"; [`Keyframes`] turns that progress into a value. Markers,
//! endpoint pulses and all decorative overlays are built from these two.

use smallvec::SmallVec;

/// Repeating activity window: waits `delay`, runs for `duration`, then idles
/// `repeat_delay` before the next run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedCycle {
    pub delay: f32,
    pub duration: f32,
    pub repeat_delay: f32,
}

impl TimedCycle {
    pub const fn new(delay: f32, duration: f32, repeat_delay: f32) -> Self {
        Self {
            delay,
            duration,
            repeat_delay,
        }
    }

    /// Continuous loop with no gaps.
    pub const fn looping(duration: f32, delay: f32) -> Self {
        Self::new(delay, duration, 0.0)
    }

    pub fn period(&self) -> f32 {
        self.duration + self.repeat_delay
    }

    /// Progress in [0, 1) while active, `None` while waiting.
    pub fn progress(&self, elapsed: f32) -> Option<f32> {
        if self.duration <= 0.0 {
            return None;
        }
        let local = elapsed - self.delay;
        if local < 0.0 {
            return None;
        }
        let phase = local.rem_euclid(self.period());
        (phase < self.duration).then(|| phase / self.duration)
    }
}

/// Piecewise-linear samples at increasing times in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes {
    times: SmallVec<[f32; 5]>,
    values: SmallVec<[f32; 5]>,
}

impl Keyframes {
    /// Evenly spaced keyframes.
    pub fn even(values: &[f32]) -> Self {
        let n = values.len();
        let times = (0..n)
            .map(|i| if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 })
            .collect();
        Self {
            times,
            values: values.iter().copied().collect(),
        }
    }

    /// Keyframes at explicit times. Lengths must match; extra entries on
    /// either side are ignored.
    pub fn timed(times: &[f32], values: &[f32]) -> Self {
        let n = times.len().min(values.len());
        Self {
            times: times[..n].iter().copied().collect(),
            values: values[..n].iter().copied().collect(),
        }
    }

    pub fn sample(&self, u: f32) -> f32 {
        let n = self.values.len();
        match n {
            0 => return 0.0,
            1 => return self.values[0],
            _ => {}
        }
        if u <= self.times[0] {
            return self.values[0];
        }
        for i in 1..n {
            if u <= self.times[i] {
                let t0 = self.times[i - 1];
                let span = self.times[i] - t0;
                let f = if span > 0.0 { (u - t0) / span } else { 1.0 };
                return self.values[i - 1] + (self.values[i] - self.values[i - 1]) * f;
            }
        }
        self.values[n - 1]
    }
}

#[inline]
pub fn ease_out_cubic(u: f32) -> f32 {
    let v = 1.0 - u.clamp(0.0, 1.0);
    1.0 - v * v * v
}
