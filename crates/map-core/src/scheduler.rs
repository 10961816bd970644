//! Single subscription list driven once per animation frame.
//!
//! Components register update functions against a [`Stage`]; each tick runs
//! them in `(stage, subscription order)`, so geometry is always settled
//! before markers are sampled and markers before compositing.

use fnv::FnvHashMap;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Geometry,
    Animate,
    Composite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Done,
}

/// Timing handed to every subscriber for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub index: u64,
    /// Clamped wall-clock delta.
    pub dt_secs: f32,
    /// Sum of clamped deltas since the clock started.
    pub elapsed_secs: f32,
}

impl FrameTime {
    pub fn dt_ms(&self) -> f32 {
        self.dt_secs * 1000.0
    }
}

/// Wall-clock frame timer. Deltas are clamped so a suspended page resumes
/// from where it stopped instead of fast-forwarding.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: Duration,
    index: u64,
    elapsed_secs: f32,
}

impl FrameClock {
    pub fn new(max_dt_secs: f32) -> Self {
        Self {
            last: None,
            max_dt: Duration::from_secs_f32(max_dt_secs.max(0.0)),
            index: 0,
            elapsed_secs: 0.0,
        }
    }

    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(prev) if now > prev => (now - prev).min(self.max_dt),
            Some(_) => Duration::ZERO,
            None => Duration::ZERO,
        };
        self.last = Some(now);
        let dt_secs = dt.as_secs_f32();
        self.elapsed_secs += dt_secs;
        let t = FrameTime {
            index: self.index,
            dt_secs,
            elapsed_secs: self.elapsed_secs,
        };
        self.index += 1;
        t
    }

    /// Forget the last timestamp; the next tick reports a zero delta.
    pub fn pause(&mut self) {
        self.last = None;
    }
}

type UpdateFn = Box<dyn FnMut(&FrameTime) -> TaskStatus>;

struct Subscription {
    stage: Stage,
    update: UpdateFn,
}

pub struct FrameScheduler {
    next_id: u64,
    tasks: FnvHashMap<SubscriptionId, Subscription>,
    order: Vec<SubscriptionId>,
    clock: FrameClock,
}

impl FrameScheduler {
    pub fn new(max_dt_secs: f32) -> Self {
        Self {
            next_id: 0,
            tasks: FnvHashMap::default(),
            order: Vec::new(),
            clock: FrameClock::new(max_dt_secs),
        }
    }

    pub fn subscribe<F>(&mut self, stage: Stage, update: F) -> SubscriptionId
    where
        F: FnMut(&FrameTime) -> TaskStatus + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            Subscription {
                stage,
                update: Box::new(update),
            },
        );
        // Ids grow monotonically, so (stage, id) is (stage, subscription order).
        let pos = self
            .order
            .partition_point(|other| (self.tasks[other].stage, *other) < (stage, id));
        self.order.insert(pos, id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.tasks.remove(&id).is_some() {
            self.order.retain(|o| *o != id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every subscription (teardown).
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.order.clear();
        self.clock.pause();
    }

    /// Called when the loop stops; the next frame starts with a zero delta.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let frame = self.clock.tick(now);
        self.run(&frame);
        frame
    }

    /// Run every subscriber once with an explicit frame time.
    pub fn run(&mut self, frame: &FrameTime) {
        let mut finished = Vec::new();
        for id in &self.order {
            if let Some(task) = self.tasks.get_mut(id) {
                if (task.update)(frame) == TaskStatus::Done {
                    finished.push(*id);
                }
            }
        }
        for id in finished {
            self.unsubscribe(id);
        }
    }
}
