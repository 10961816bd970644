pub mod compose;
pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod fidelity;
pub mod geo;
pub mod marker;
pub mod overlay;
pub mod path;
pub mod projection;
pub mod scene;
pub mod scheduler;
pub mod timeline;
pub mod visibility;
pub mod widget;

pub use compose::{compose, ComposeInput, ComposedArc};
pub use config::{InertiaParams, MapConfig, MarkerTimings};
pub use drag::{CaptureToken, DragController, DragPhase, PointerSample};
pub use error::ConfigError;
pub use fidelity::{select_tier, DeviceSignals, FidelitySelector, FidelityTier, TierName};
pub use geo::{default_connections, Connection, GeoPoint, ProjectedPoint, Rgba};
pub use marker::{MarkerAnimator, MarkerPhase, MarkerSample};
pub use overlay::{OverlaySet, ParticleCycle, ParticleShape};
pub use path::{curve, QuadCurve};
pub use projection::{Projector, SurfaceSize};
pub use scene::{DrawItem, Layer, LayerKind, Scene, TextAlign};
pub use scheduler::{FrameClock, FrameScheduler, FrameTime, Stage, SubscriptionId, TaskStatus};
pub use timeline::{Keyframes, TimedCycle};
pub use visibility::{GateState, VisibilityGate};
pub use widget::{attach, WorldMap};
