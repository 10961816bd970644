//! Decides when the animation loop may run.
//!
//! The loop starts the first time the widget is reported visible. When the
//! host has no visibility signal at all, a fallback timer starts it anyway.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Never seen yet; waiting for a signal or the fallback.
    Pending,
    Visible,
    Hidden,
}

#[derive(Clone, Debug)]
pub struct VisibilityGate {
    state: GateState,
    fallback_ms: u32,
    waited_ms: f64,
    has_signal: bool,
}

impl VisibilityGate {
    pub fn new(fallback_ms: u32) -> Self {
        Self {
            state: GateState::Pending,
            fallback_ms,
            waited_ms: 0.0,
            has_signal: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn should_run(&self) -> bool {
        self.state == GateState::Visible
    }

    pub fn fallback_ms(&self) -> u32 {
        self.fallback_ms
    }

    /// Report an intersection change. Returns true when running state flips.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        self.has_signal = true;
        let was = self.should_run();
        self.state = if intersecting {
            GateState::Visible
        } else if self.state == GateState::Pending {
            GateState::Pending
        } else {
            GateState::Hidden
        };
        was != self.should_run()
    }

    /// Time passing without a visibility signal. Returns true when the
    /// fallback fires.
    pub fn wait(&mut self, dt_ms: f64) -> bool {
        if self.state != GateState::Pending || self.has_signal {
            return false;
        }
        self.waited_ms += dt_ms.max(0.0);
        if self.waited_ms >= self.fallback_ms as f64 {
            log::info!("[visibility] no signal after {} ms; starting", self.fallback_ms);
            self.state = GateState::Visible;
            true
        } else {
            false
        }
    }

    /// Force the fallback (e.g. the platform lacks an observer entirely).
    pub fn fallback_elapsed(&mut self) -> bool {
        let remaining = self.fallback_ms as f64 - self.waited_ms;
        self.wait(remaining.max(0.0))
    }
}
