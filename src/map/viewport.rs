//! Viewport & layer controller
//!
//! Owns the walkers camera state ([`MapMemory`]), the highlight layer
//! filters and the single location marker. All commands are idempotent and
//! fire-and-forget: calling with the same argument twice leaves the state
//! identical, and a new argument always supersedes the previous one
//! (last-write-wins, no queued animations).
//!
//! Commands issued before the map engine is ready are deferred and replayed
//! by [`ViewportController::initialize`], never silently dropped.

use crate::districts::{DistrictId, Location};
use geo::{Coord, Rect};
use instant::Instant;
use walkers::MapMemory;

/// Zoom subtracted from the exact fit to keep a padding margin around the
/// framed bounds.
const FRAME_PADDING_ZOOM: f64 = 0.5;

/// Duration of an animated camera move.
const FRAME_ANIMATION_MS: f64 = 500.0;

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 18.0;

/// Zoom used when the framed bounds have no extent.
const POINT_BOUNDS_ZOOM: f64 = 12.0;

/// The whole serviceable area: the New York City bounding box. Framed at
/// startup and whenever the selection clears.
pub fn default_region() -> Rect<f64> {
    Rect::new(
        Coord {
            x: -74.2591,
            y: 40.4774,
        },
        Coord {
            x: -73.7002,
            y: 40.9162,
        },
    )
}

/// Camera pose derived from a bounding box, with the fixed padding margin.
pub(crate) fn camera_for_bounds(bounds: Rect<f64>) -> Camera {
    let center = bounds.center();
    let max_span = bounds.width().abs().max(bounds.height().abs());

    let zoom = if max_span > 0.0 {
        ((4.0 * 360.0 / max_span).log2() - FRAME_PADDING_ZOOM).clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        POINT_BOUNDS_ZOOM
    };

    Camera {
        lat: center.y,
        lon: center.x,
        zoom,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

/// Hover and selection highlight filters. `None` is the "no id" sentinel:
/// that layer highlights nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerFilters {
    pub hover: Option<DistrictId>,
    pub selected: Option<DistrictId>,
}

#[derive(Clone, Debug, PartialEq)]
enum Command {
    SetHoverHighlight(Option<DistrictId>),
    SetSelectionHighlight(Option<DistrictId>),
    PlaceMarker(Option<Location>),
    FrameBounds { bounds: Rect<f64>, animate: bool },
    FrameDefaultRegion { animate: bool },
}

struct CameraAnimation {
    from: Camera,
    to: Camera,
    started: Instant,
}

pub struct ViewportController {
    memory: MapMemory,
    filters: LayerFilters,
    marker: Option<Location>,
    ready: bool,
    deferred: Vec<Command>,
    animations_enabled: bool,
    camera: Camera,
    animation: Option<CameraAnimation>,
}

impl ViewportController {
    pub fn new(animations_enabled: bool) -> Self {
        let camera = camera_for_bounds(default_region());
        let mut memory = MapMemory::default();
        memory.center_at(walkers::lat_lon(camera.lat, camera.lon));
        if memory.set_zoom(camera.zoom).is_err() {
            tracing::warn!(zoom = camera.zoom, "Initial zoom rejected by map memory");
        }

        Self {
            memory,
            filters: LayerFilters::default(),
            marker: None,
            ready: false,
            deferred: Vec::new(),
            animations_enabled,
            camera,
            animation: None,
        }
    }

    /// Mark the map engine ready and replay deferred commands, in order.
    /// Calling again is a no-op.
    pub fn initialize(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;

        let deferred = std::mem::take(&mut self.deferred);
        if !deferred.is_empty() {
            tracing::debug!(count = deferred.len(), "Replaying deferred map commands");
        }
        for command in deferred {
            self.apply(command);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_hover_highlight(&mut self, id: Option<DistrictId>) {
        self.submit(Command::SetHoverHighlight(id));
    }

    pub fn set_selection_highlight(&mut self, id: Option<DistrictId>) {
        self.submit(Command::SetSelectionHighlight(id));
    }

    /// Show, move or hide the single location marker. Repositioning replaces,
    /// never adds.
    pub fn place_marker(&mut self, location: Option<Location>) {
        self.submit(Command::PlaceMarker(location));
    }

    /// Move the camera to fit the bounds with a fixed padding margin.
    pub fn frame_bounds(&mut self, bounds: Rect<f64>, animate: bool) {
        self.submit(Command::FrameBounds { bounds, animate });
    }

    /// Reset the camera to the whole serviceable area.
    pub fn frame_default_region(&mut self, animate: bool) {
        self.submit(Command::FrameDefaultRegion { animate });
    }

    /// Advance the camera animation and write the pose into the map memory.
    /// This is the single mutation point for the rendering engine camera.
    pub fn tick(&mut self, now: Instant) {
        let Some(animation) = &self.animation else {
            return;
        };

        let elapsed_ms = now.duration_since(animation.started).as_secs_f64() * 1000.0;
        let t = (elapsed_ms / FRAME_ANIMATION_MS).clamp(0.0, 1.0);
        let eased = t * t * (3.0 - 2.0 * t);

        let (from, to) = (animation.from, animation.to);
        let camera = Camera {
            lat: lerp(from.lat, to.lat, eased),
            lon: lerp(from.lon, to.lon, eased),
            zoom: lerp(from.zoom, to.zoom, eased),
        };

        self.camera = camera;
        self.write_camera(camera);

        if t >= 1.0 {
            self.camera = to;
            self.animation = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn filters(&self) -> LayerFilters {
        self.filters
    }

    pub fn marker(&self) -> Option<Location> {
        self.marker
    }

    /// Last commanded camera pose (the animation target once it settles).
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Mutable access for the walkers `Map` widget; the widget reads the
    /// camera and applies user panning.
    pub fn memory_mut(&mut self) -> &mut MapMemory {
        &mut self.memory
    }

    fn submit(&mut self, command: Command) {
        if self.ready {
            self.apply(command);
        } else {
            tracing::debug!(?command, "Map engine not ready, deferring command");
            self.deferred.push(command);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetHoverHighlight(id) => self.filters.hover = id,
            Command::SetSelectionHighlight(id) => self.filters.selected = id,
            Command::PlaceMarker(location) => self.marker = location,
            Command::FrameBounds { bounds, animate } => {
                self.move_camera(camera_for_bounds(bounds), animate);
            }
            Command::FrameDefaultRegion { animate } => {
                self.move_camera(camera_for_bounds(default_region()), animate);
            }
        }
    }

    fn move_camera(&mut self, target: Camera, animate: bool) {
        if animate && self.animations_enabled {
            // Re-framing the current target keeps the in-flight animation.
            if let Some(animation) = &self.animation {
                if animation.to == target {
                    return;
                }
            }
            if self.camera == target {
                self.animation = None;
                return;
            }
            self.animation = Some(CameraAnimation {
                from: self.camera,
                to: target,
                started: Instant::now(),
            });
        } else {
            self.animation = None;
            self.camera = target;
            self.write_camera(target);
        }
    }

    fn write_camera(&mut self, camera: Camera) {
        self.memory.center_at(walkers::lat_lon(camera.lat, camera.lon));
        if self.memory.set_zoom(camera.zoom).is_err() {
            tracing::warn!(zoom = camera.zoom, "Zoom level rejected by map memory");
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
