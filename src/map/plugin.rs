//! Walkers plugin for the district layers
//!
//! Paints the district fill/border layers, the hover and selection
//! highlights and the location marker, and performs pointer hit-testing by
//! unprojecting the hover position through the selectable resolver.
//! Non-selectable placeholder areas are excluded here, so downstream code
//! never sees hover or click events for them.

use crate::districts::{resolve, DistrictId, DistrictIndex, Location};
use crate::map::viewport::LayerFilters;
use egui::{Color32, Stroke};
use std::sync::{Arc, RwLock};
use walkers::{Plugin, Projector};

/// Pointer events observed during one frame, published back to the app.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapEvents {
    /// Selectable district under the pointer, with the screen point for
    /// tooltip placement.
    pub hover: Option<(DistrictId, egui::Pos2)>,
    /// Selectable district that was clicked this frame.
    pub clicked: Option<DistrictId>,
}

fn base_fill() -> Color32 {
    Color32::from_rgb(0x6d, 0x74, 0xb6).gamma_multiply(0.12)
}

fn hover_fill() -> Color32 {
    Color32::from_rgb(0x6d, 0x74, 0xb6).gamma_multiply(0.4)
}

fn selection_fill() -> Color32 {
    Color32::from_rgb(0xb6, 0x6d, 0x6d).gamma_multiply(0.4)
}

fn border_stroke() -> Stroke {
    Stroke::new(1.0, Color32::from_rgb(0x1f, 0x33, 0x6b))
}

fn selection_border_stroke() -> Stroke {
    Stroke::new(2.0, Color32::from_rgb(0x6b, 0x1f, 0x1f))
}

/// Plugin for rendering district layers on the map
pub struct DistrictLayerPlugin {
    index: Arc<DistrictIndex>,
    filters: LayerFilters,
    marker: Option<Location>,
    events: Arc<RwLock<MapEvents>>,
}

impl DistrictLayerPlugin {
    pub fn new(
        index: Arc<DistrictIndex>,
        filters: LayerFilters,
        marker: Option<Location>,
        events: Arc<RwLock<MapEvents>>,
    ) -> Self {
        Self {
            index,
            filters,
            marker,
            events,
        }
    }

    /// Project a part's exterior ring into screen space.
    fn screen_ring(part_ring: &geo::LineString<f64>, projector: &Projector) -> Vec<egui::Pos2> {
        part_ring
            .coords()
            .map(|coord| {
                let position = walkers::lat_lon(coord.y, coord.x);
                let screen_vec = projector.project(position);
                egui::Pos2::new(screen_vec.x, screen_vec.y)
            })
            .collect()
    }

    fn fill(painter: &egui::Painter, points: Vec<egui::Pos2>, color: Color32) {
        painter.add(egui::Shape::Path(egui::epaint::PathShape {
            points,
            closed: true,
            fill: color,
            stroke: egui::epaint::PathStroke::NONE,
        }));
    }
}

impl Plugin for DistrictLayerPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("DistrictLayerPlugin::run");

        let painter = ui.painter();

        // Base fill and border layers, with placeholder areas excluded.
        for part in self.index.parts() {
            if !part.id.is_selectable() {
                continue;
            }
            let points = Self::screen_ring(part.polygon.exterior(), projector);
            if points.len() < 3 {
                continue;
            }
            Self::fill(painter, points.clone(), base_fill());
            painter.add(egui::Shape::closed_line(points, border_stroke()));
        }

        // Hover highlight above the base layers.
        if let Some(hovered) = self.filters.hover {
            for part in self.index.parts().iter().filter(|p| p.id == hovered) {
                let points = Self::screen_ring(part.polygon.exterior(), projector);
                if points.len() >= 3 {
                    Self::fill(painter, points, hover_fill());
                }
            }
        }

        // Selection highlight above everything else.
        if let Some(selected) = self.filters.selected {
            for part in self.index.parts().iter().filter(|p| p.id == selected) {
                let points = Self::screen_ring(part.polygon.exterior(), projector);
                if points.len() >= 3 {
                    Self::fill(painter, points.clone(), selection_fill());
                    painter.add(egui::Shape::closed_line(points, selection_border_stroke()));
                }
            }
        }

        // The single location marker.
        if let Some(location) = self.marker {
            let screen_vec = projector.project(walkers::lat_lon(location.lat, location.lon));
            let center = egui::Pos2::new(screen_vec.x, screen_vec.y);
            painter.circle(
                center,
                7.0,
                Color32::from_rgb(0x1f, 0x33, 0x6b),
                Stroke::new(2.0, Color32::WHITE),
            );
        }

        // Pointer hit-testing through the selectable resolver.
        let mut events = MapEvents::default();
        if let Some(pointer) = response.hover_pos() {
            let position = projector.unproject(pointer.to_vec2());
            let point = geo::Point::new(position.x(), position.y());
            if let Some(id) = resolve::selectable_district_for_point(point, &self.index) {
                events.hover = Some((id, pointer));
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    events.clicked = Some(id);
                }
            }
        }

        if let Ok(mut shared) = self.events.write() {
            *shared = events;
        }
    }
}
