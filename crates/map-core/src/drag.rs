//! Horizontal drag with momentum.
//!
//! `Idle -> Dragging -> Decaying -> Idle`. The controller is the only writer
//! of the scroll offset. Exclusive pointer routing is an explicit
//! [`CaptureToken`] handed out on pointer-down; move/up/cancel events must
//! present it, so the state machine does not depend on any platform capture
//! API.

use crate::config::InertiaParams;

/// Pointer event reduced to what the controller needs. `time_ms` is any
/// monotonic millisecond clock (e.g. `PointerEvent.timeStamp`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    pub x: f32,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(pointer_id: i32, x: f32, time_ms: f64) -> Self {
        Self {
            pointer_id,
            x,
            time_ms,
        }
    }
}

/// Proof of ownership of the pointer stream for one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureToken {
    pointer_id: i32,
    generation: u32,
}

impl CaptureToken {
    pub fn pointer_id(&self) -> i32 {
        self.pointer_id
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub pointer_id: i32,
    pub origin_x: f32,
    pub origin_offset: f32,
    pub last_x: f32,
    pub last_t: f64,
    /// Offset velocity in surface units per millisecond.
    pub velocity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging(DragSession),
    Decaying { velocity: f32 },
}

#[derive(Clone, Debug)]
pub struct DragController {
    params: InertiaParams,
    phase: DragPhase,
    offset: f32,
    generation: u32,
    owner: Option<CaptureToken>,
    accumulator_ms: f32,
    dragged_once: bool,
}

impl DragController {
    pub fn new(params: InertiaParams) -> Self {
        Self {
            params,
            phase: DragPhase::Idle,
            offset: 0.0,
            generation: 0,
            owner: None,
            accumulator_ms: 0.0,
            dragged_once: false,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    pub fn is_decaying(&self) -> bool {
        matches!(self.phase, DragPhase::Decaying { .. })
    }

    pub fn owner(&self) -> Option<CaptureToken> {
        self.owner
    }

    /// True once any drag has started; hides the drag hint.
    pub fn has_dragged(&self) -> bool {
        self.dragged_once
    }

    pub fn velocity(&self) -> f32 {
        match self.phase {
            DragPhase::Idle => 0.0,
            DragPhase::Dragging(s) => s.velocity,
            DragPhase::Decaying { velocity } => velocity,
        }
    }

    /// Start a drag. Returns `None` while another pointer owns the surface.
    /// A decay in progress is cancelled and its offset becomes the origin;
    /// its velocity is discarded.
    pub fn pointer_down(&mut self, sample: PointerSample) -> Option<CaptureToken> {
        if let Some(owner) = self.owner {
            if owner.pointer_id != sample.pointer_id {
                return None;
            }
            // Same pointer pressed again: its release was lost.
        }
        self.generation = self.generation.wrapping_add(1);
        let token = CaptureToken {
            pointer_id: sample.pointer_id,
            generation: self.generation,
        };
        self.owner = Some(token);
        self.accumulator_ms = 0.0;
        self.dragged_once = true;
        self.phase = DragPhase::Dragging(DragSession {
            pointer_id: sample.pointer_id,
            origin_x: sample.x,
            origin_offset: self.offset,
            last_x: sample.x,
            last_t: sample.time_ms,
            velocity: 0.0,
        });
        Some(token)
    }

    /// Returns false when the token is stale or no drag is active.
    pub fn pointer_move(&mut self, token: &CaptureToken, sample: PointerSample) -> bool {
        if self.owner != Some(*token) || sample.pointer_id != token.pointer_id {
            return false;
        }
        let DragPhase::Dragging(session) = &mut self.phase else {
            return false;
        };
        let dt = sample.time_ms - session.last_t;
        if dt > 0.0 {
            session.velocity = -(sample.x - session.last_x) / dt as f32;
        }
        session.last_x = sample.x;
        session.last_t = sample.time_ms;
        self.offset = session.origin_offset - (sample.x - session.origin_x);
        true
    }

    /// Release. A final sample at a new position is applied as a move first.
    /// Motion older than `release_window_ms` carries no momentum.
    pub fn pointer_up(&mut self, token: &CaptureToken, sample: PointerSample) -> bool {
        if self.owner != Some(*token) {
            return false;
        }
        if let DragPhase::Dragging(session) = self.phase {
            if sample.x != session.last_x {
                self.pointer_move(token, sample);
            }
        }
        let window = self.params.release_window_ms as f64;
        if let DragPhase::Dragging(session) = &mut self.phase {
            if sample.time_ms - session.last_t > window {
                session.velocity = 0.0;
            }
        }
        self.release()
    }

    /// Platform interrupted the gesture; same exit as pointer-up.
    pub fn pointer_cancel(&mut self, token: &CaptureToken) -> bool {
        if self.owner != Some(*token) {
            return false;
        }
        self.release()
    }

    fn release(&mut self) -> bool {
        self.owner = None;
        let DragPhase::Dragging(session) = self.phase else {
            return false;
        };
        self.accumulator_ms = 0.0;
        self.phase = if session.velocity.abs() < self.params.min_velocity {
            DragPhase::Idle
        } else {
            DragPhase::Decaying {
                velocity: session.velocity,
            }
        };
        true
    }

    /// One inertia step. Returns false once the controller is idle.
    pub fn decay_step(&mut self) -> bool {
        let DragPhase::Decaying { velocity } = self.phase else {
            return false;
        };
        self.offset += velocity * self.params.frame_interval_ms;
        let next = velocity * self.params.friction;
        if next.abs() < self.params.min_velocity {
            self.phase = DragPhase::Idle;
            self.accumulator_ms = 0.0;
            false
        } else {
            self.phase = DragPhase::Decaying { velocity: next };
            true
        }
    }

    /// Advance the decay loop by a wall-clock delta on a fixed timestep.
    /// Returns the number of decay steps taken.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.is_decaying() || dt_ms.is_nan() || dt_ms <= 0.0 {
            return 0;
        }
        self.accumulator_ms += dt_ms;
        let mut steps = 0;
        while self.accumulator_ms >= self.params.frame_interval_ms
            && steps < self.params.max_steps_per_frame
        {
            self.accumulator_ms -= self.params.frame_interval_ms;
            steps += 1;
            if !self.decay_step() {
                break;
            }
        }
        if steps == self.params.max_steps_per_frame {
            // Drop the backlog rather than spiral after a long stall.
            self.accumulator_ms = self.accumulator_ms.min(self.params.frame_interval_ms);
        }
        steps
    }

    /// Tear down any gesture or momentum (unmount, visibility loss).
    pub fn cancel(&mut self) {
        self.owner = None;
        self.accumulator_ms = 0.0;
        self.phase = DragPhase::Idle;
    }
}

/// Upper bound on decay steps from `v0` to rest.
pub fn steps_to_rest(v0: f32, params: &InertiaParams) -> u32 {
    let v = v0.abs();
    if v < params.min_velocity {
        return 0;
    }
    let n = (params.min_velocity / v).ln() / params.friction.ln();
    n.ceil().max(1.0) as u32 + 1
}
