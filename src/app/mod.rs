//! Application module
//!
//! The eframe application: a full-screen walkers map with the district
//! layers plugin, a left sidebar for search and district info, and the
//! per-frame wiring between the selection store, the sync machine and the
//! viewport controller.

pub(crate) mod settings;
pub(crate) mod state;
mod ui_panels;

use crate::app::settings::Settings;
use crate::app::state::{AppState, TilesProvider, UiSettings};
use crate::districts::DistrictIndex;
use crate::map::plugin::{DistrictLayerPlugin, MapEvents};
use crate::map::sync::{SelectionSync, StoreRequest};
use crate::map::viewport::ViewportController;
use eframe::egui;
use std::sync::{Arc, RwLock};
use walkers::{
    HttpTiles, Map, TileId,
    sources::{Attribution, OpenStreetMap, TileSource},
};

/// Custom OpenTopoMap tile source
pub struct OpenTopoMap;

impl TileSource for OpenTopoMap {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tile.opentopomap.org/{}/{}/{}.png",
            tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenTopoMap (CC-BY-SA)",
            url: "https://opentopomap.org/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        17 // OpenTopoMap has max zoom of 17
    }
}

/// Persisted settings (lightweight, selection is intentionally not kept)
#[derive(serde::Serialize, serde::Deserialize)]
struct PersistedSettings {
    tiles_provider: String,
}

/// Main application structure
pub struct BoardMapApp {
    /// Application state (selection store, UI settings)
    state: AppState,

    /// Loaded district geometry, shared with the render plugin
    index: Arc<DistrictIndex>,

    /// Selection synchronization state machine
    sync: SelectionSync,

    /// Viewport & layer controller (camera, highlights, marker)
    viewport: ViewportController,

    /// Map tiles provider (OpenStreetMap)
    tiles_osm: HttpTiles,

    /// Map tiles provider (OpenTopoMap)
    tiles_otm: HttpTiles,

    /// Pointer events published by the plugin each frame
    events: Arc<RwLock<MapEvents>>,
}

impl BoardMapApp {
    pub fn new(settings: Settings, cc: &eframe::CreationContext<'_>) -> Self {
        let index = Arc::new(DistrictIndex::load_or_empty(&settings.districts));
        if index.is_empty() {
            tracing::warn!("No district geometry, selection features are disabled");
        }

        let mut viewport = ViewportController::new(!settings.no_animate);
        // Deferred until the first frame marks the engine ready.
        viewport.frame_default_region(false);

        let ui_settings = cc
            .storage
            .and_then(Self::load_persisted_settings)
            .unwrap_or_default();

        let tiles_osm = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());
        let tiles_otm = HttpTiles::new(OpenTopoMap, cc.egui_ctx.clone());

        Self {
            state: AppState {
                store: Default::default(),
                ui_settings,
            },
            index,
            sync: SelectionSync::new(),
            viewport,
            tiles_osm,
            tiles_otm,
            events: Arc::new(RwLock::new(MapEvents::default())),
        }
    }

    fn load_persisted_settings(storage: &dyn eframe::Storage) -> Option<UiSettings> {
        let json = storage.get_string("persisted_settings")?;
        let persisted: PersistedSettings = serde_json::from_str(&json).ok()?;
        tracing::debug!("Restored persisted UI settings");
        Some(UiSettings {
            tiles_provider: TilesProvider::from_name(&persisted.tiles_provider),
            ..Default::default()
        })
    }

    fn handle_request(&mut self, request: StoreRequest) {
        match request {
            StoreRequest::SelectDistrict(district) => self.state.store.select_district(district),
        }
    }
}

#[profiling::all_functions]
impl eframe::App for BoardMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The map surface exists from the first frame on; commands issued
        // during construction are replayed here.
        if !self.viewport.is_ready() {
            self.viewport.initialize();
        }

        self.viewport.tick(instant::Instant::now());

        // Render the sidebar (search, district info, tile picker).
        ui_panels::render_sidebar(ctx, &mut self.state);

        // Reconcile the external selection store.
        let snapshot = self.state.store.snapshot();
        if let Some(request) = self.sync.apply_store(snapshot, &self.index, &mut self.viewport) {
            self.handle_request(request);
        }

        // Capture values the map closure needs.
        let filters = self.viewport.filters();
        let marker = self.viewport.marker();
        let attribution_text = self.state.ui_settings.tiles_provider.attribution();
        let tiles: &mut HttpTiles = match self.state.ui_settings.tiles_provider {
            TilesProvider::OpenStreetMap => &mut self.tiles_osm,
            TilesProvider::OpenTopoMap => &mut self.tiles_otm,
        };

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let plugin = DistrictLayerPlugin::new(
                    self.index.clone(),
                    filters,
                    marker,
                    self.events.clone(),
                );

                let map = Map::new(
                    Some(tiles),
                    self.viewport.memory_mut(),
                    walkers::lat_lon(0.0, 0.0),
                )
                .with_plugin(plugin);

                ui.add(map);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    attribution_text,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });

        // Drain pointer events published by the plugin this frame.
        let events = self.events.try_read().map(|e| *e).unwrap_or_default();
        match events.hover {
            Some((id, screen)) => self.sync.pointer_moved(id, screen, &mut self.viewport),
            None => self.sync.pointer_left(&mut self.viewport),
        }
        if let Some(id) = events.clicked {
            let request = self.sync.clicked(id);
            self.handle_request(request);
        }

        if let Some(hover) = self.sync.hover() {
            ui_panels::hover_tooltip(ctx, hover);
        }

        if self.viewport.is_animating() {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedSettings {
            tiles_provider: self.state.ui_settings.tiles_provider.name().to_string(),
        };
        if let Ok(json) = serde_json::to_string(&persisted) {
            storage.set_string("persisted_settings", json);
            tracing::debug!("Saved UI settings on exit");
        }
    }
}
