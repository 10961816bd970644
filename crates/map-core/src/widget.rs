//! The world-map widget as a whole: owns every component and wires them to
//! the frame scheduler.

use crate::compose::{compose, ComposeInput, ComposedArc};
use crate::config::MapConfig;
use crate::drag::{CaptureToken, DragController, PointerSample};
use crate::error::ConfigError;
use crate::fidelity::{DeviceSignals, FidelitySelector, FidelityTier};
use crate::geo::{Connection, Rgba};
use crate::marker::{MarkerAnimator, MarkerSample};
use crate::overlay::OverlaySet;
use crate::path::{curve, QuadCurve};
use crate::projection::{Projector, SurfaceSize};
use crate::scene::Scene;
use crate::scheduler::{FrameScheduler, FrameTime, Stage, SubscriptionId, TaskStatus};
use std::cell::RefCell;
use std::rc::Rc;

pub struct WorldMap {
    config: MapConfig,
    line_color: Rgba,
    projector: Projector,
    connections: Vec<Connection>,
    curves: Vec<QuadCurve>,
    colors: Vec<Rgba>,
    markers: Option<MarkerAnimator>,
    marker_samples: Vec<MarkerSample>,
    drag: DragController,
    fidelity: FidelitySelector,
    overlays: Option<OverlaySet>,
    elapsed: f32,
}

impl WorldMap {
    pub fn new(
        config: MapConfig,
        connections: Vec<Connection>,
        signals: DeviceSignals,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("[map] rejecting config: {e}");
            return Err(e);
        }
        let line_color = config.line_rgba()?;
        let fidelity = FidelitySelector::new(signals, config.mobile_breakpoint_px);
        let projector = Projector::new(Projector::view_box_size(config.surface_height));
        let mut map = Self {
            drag: DragController::new(config.inertia),
            config,
            line_color,
            projector,
            connections,
            curves: Vec::new(),
            colors: Vec::new(),
            markers: None,
            marker_samples: Vec::new(),
            fidelity,
            overlays: None,
            elapsed: 0.0,
        };
        map.rebuild_geometry();
        map.rebuild_markers();
        Ok(map)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn size(&self) -> SurfaceSize {
        self.projector.size()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn curves(&self) -> &[QuadCurve] {
        &self.curves
    }

    pub fn tier(&self) -> FidelityTier {
        self.fidelity.tier()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn markers(&self) -> Option<&MarkerAnimator> {
        self.markers.as_ref()
    }

    pub fn marker_samples(&self) -> &[MarkerSample] {
        &self.marker_samples
    }

    pub fn overlays(&self) -> Option<&OverlaySet> {
        self.overlays.as_ref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
        self.rebuild_geometry();
        self.rebuild_markers();
    }

    /// Changing the surface re-projects every curve; marker progress is kept.
    pub fn set_surface_size(&mut self, size: SurfaceSize) {
        if size == self.projector.size() || size.width <= 0.0 || size.height <= 0.0 {
            return;
        }
        self.projector = Projector::new(size);
        self.rebuild_geometry();
    }

    pub fn set_markers_enabled(&mut self, enabled: bool) {
        if self.config.markers_enabled == enabled {
            return;
        }
        self.config.markers_enabled = enabled;
        self.rebuild_markers();
    }

    pub fn on_viewport_resize(&mut self, viewport_width: f32) {
        if self.fidelity.on_resize(viewport_width) {
            let tier = self.fidelity.tier();
            if let Some(m) = &mut self.markers {
                m.set_tier(&tier);
            }
        }
    }

    pub fn pointer_down(&mut self, sample: PointerSample) -> Option<CaptureToken> {
        self.drag.pointer_down(sample)
    }

    pub fn pointer_move(&mut self, token: &CaptureToken, sample: PointerSample) -> bool {
        self.drag.pointer_move(token, sample)
    }

    pub fn pointer_up(&mut self, token: &CaptureToken, sample: PointerSample) -> bool {
        self.drag.pointer_up(token, sample)
    }

    pub fn pointer_cancel(&mut self, token: &CaptureToken) -> bool {
        self.drag.pointer_cancel(token)
    }

    /// Geometry stage: momentum moves the pan offset.
    pub fn advance_geometry(&mut self, frame: &FrameTime) {
        self.drag.advance(frame.dt_ms());
    }

    /// Animate stage: markers advance and are sampled against current curves.
    pub fn advance_markers(&mut self, frame: &FrameTime) {
        self.elapsed += frame.dt_secs;
        match &mut self.markers {
            Some(m) => {
                m.advance(frame.dt_secs);
                self.marker_samples = m.samples(&self.curves);
            }
            None => self.marker_samples.clear(),
        }
    }

    pub fn compose(&self) -> Scene {
        let arcs: Vec<ComposedArc> = self
            .connections
            .iter()
            .zip(self.curves.iter().zip(&self.colors))
            .map(|(c, (curve, color))| ComposedArc {
                curve: *curve,
                color: *color,
                start: &c.start,
                end: &c.end,
            })
            .collect();
        compose(&ComposeInput {
            projector: &self.projector,
            offset: self.drag.offset(),
            arcs: &arcs,
            markers: &self.marker_samples,
            overlays: self.overlays.as_ref(),
            tier: self.fidelity.tier(),
            elapsed: self.elapsed,
            show_hint: !self.drag.has_dragged(),
        })
    }

    /// Drop any gesture or momentum in flight.
    pub fn cancel_interaction(&mut self) {
        self.drag.cancel();
    }

    /// The render loop was suspended or resumed. Going off screen ends any
    /// drag or decay; nothing resumes it on return.
    pub fn on_visibility(&mut self, visible: bool) {
        if visible {
            return;
        }
        if !self.drag.is_idle() {
            log::debug!("[map] hidden; dropping {:?}", self.drag.phase());
        }
        self.cancel_interaction();
    }

    fn rebuild_geometry(&mut self) {
        let arc_height = self.config.arc_height;
        self.curves = self
            .connections
            .iter()
            .map(|c| {
                curve(
                    self.projector.project_point(&c.start),
                    self.projector.project_point(&c.end),
                    arc_height,
                )
            })
            .collect();
        self.colors = self
            .connections
            .iter()
            .map(|c| c.resolved_color(self.line_color))
            .collect();
        self.overlays = self
            .config
            .overlays_enabled
            .then(|| OverlaySet::build(&self.projector, &self.curves));
    }

    fn rebuild_markers(&mut self) {
        self.markers = self.config.markers_enabled.then(|| {
            MarkerAnimator::new(
                self.connections.len(),
                self.config.markers,
                &self.fidelity.tier(),
            )
        });
        self.marker_samples.clear();
    }
}

/// Register the widget's three per-frame updates. `present` receives each
/// composed scene. Returns the subscription ids in stage order.
pub fn attach<P>(
    map: &Rc<RefCell<WorldMap>>,
    scheduler: &mut FrameScheduler,
    mut present: P,
) -> [SubscriptionId; 3]
where
    P: FnMut(&Scene) + 'static,
{
    let geometry = {
        let map = map.clone();
        scheduler.subscribe(Stage::Geometry, move |frame| {
            map.borrow_mut().advance_geometry(frame);
            TaskStatus::Continue
        })
    };
    let animate = {
        let map = map.clone();
        scheduler.subscribe(Stage::Animate, move |frame| {
            map.borrow_mut().advance_markers(frame);
            TaskStatus::Continue
        })
    };
    let composite = {
        let map = map.clone();
        scheduler.subscribe(Stage::Composite, move |_| {
            let scene = map.borrow().compose();
            present(&scene);
            TaskStatus::Continue
        })
    };
    [geometry, animate, composite]
}
