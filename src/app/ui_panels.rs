//! UI panels for the application
//!
//! The sidebar (intro, coordinate search, district info) and the hover
//! tooltip. Panels only talk to the selection store; everything the map
//! shows follows from store changes through the sync machine.

use crate::app::state::{AppState, TilesProvider};
use crate::districts::Location;
use crate::map::sync::HoverState;
use egui::{RichText, Ui};

/// Render the left sidebar: district info when a district is selected, the
/// "no community board" notice for an unresolved location, the intro and
/// search box otherwise.
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("sidebar")
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);

            if state.store.district().is_some() {
                district_info_panel(ui, state);
            } else if state.store.location().is_some() {
                no_district_panel(ui, state);
            } else {
                intro_panel(ui);
                ui.add_space(8.0);
                search_panel(ui, state);
            }

            ui.add_space(12.0);
            ui.separator();
            tiles_panel(ui, state);
        });
}

fn intro_panel(ui: &mut Ui) {
    ui.heading("Boardmap");
    ui.separator();
    ui.label("Find your New York City community board.");
    ui.add_space(4.0);
    ui.label(
        RichText::new("Click a district on the map, or enter a coordinate to locate the board responsible for it.")
            .small(),
    );
}

fn district_info_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(district) = state.store.district() else {
        return;
    };

    ui.heading(district.display_text());
    ui.separator();

    if let Some(borough) = district.borough_name() {
        ui.label(format!(
            "Community Board {} of {}.",
            district.board_number(),
            borough
        ));
    }
    ui.label(RichText::new(format!("BoroCD {}", district.code())).small().weak());

    ui.add_space(8.0);
    if ui.button("⬅ Back to map").clicked() {
        state.store.clear();
    }
}

fn no_district_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("No community board");
    ui.separator();
    ui.label("The selected location is not inside any community district.");

    ui.add_space(8.0);
    if ui.button("⬅ Back to map").clicked() {
        state.store.clear();
    }
}

fn search_panel(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("Locate a point").strong());

    let response = ui.add(
        egui::TextEdit::singleline(&mut state.ui_settings.search_text)
            .hint_text("latitude, longitude"),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    if ui.button("Locate").clicked() || submitted {
        match parse_location(&state.ui_settings.search_text) {
            Some(location) => {
                state.ui_settings.search_error = None;
                state.store.select_location(location);
            }
            None => {
                state.ui_settings.search_error =
                    Some("Enter a coordinate like 40.73, -73.99".to_string());
            }
        }
    }

    if let Some(error) = &state.ui_settings.search_error {
        ui.label(
            RichText::new(error)
                .small()
                .color(ui.visuals().warn_fg_color),
        );
    }
}

fn tiles_panel(ui: &mut Ui, state: &mut AppState) {
    ui.collapsing("Map Tiles", |ui| {
        for provider in TilesProvider::all() {
            let selected = state.ui_settings.tiles_provider == *provider;
            if ui.selectable_label(selected, provider.name()).clicked() {
                state.ui_settings.tiles_provider = *provider;
            }
        }

        ui.add_space(4.0);
        ui.label(
            RichText::new(state.ui_settings.tiles_provider.attribution())
                .small()
                .italics(),
        );
    });
}

/// Render the hover tooltip next to the pointer.
pub fn hover_tooltip(ctx: &egui::Context, hover: HoverState) {
    egui::Area::new(egui::Id::new("district_tooltip"))
        .fixed_pos(hover.screen + egui::vec2(14.0, 14.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(hover.id.display_text());
            });
        });
}

/// Parse a "latitude, longitude" pair. This stands in for the geocoding
/// collaborator: anything that yields a [`Location`] works the same way.
pub fn parse_location(input: &str) -> Option<Location> {
    let (lat_text, lon_text) = input.split_once(',')?;
    let lat: f64 = lat_text.trim().parse().ok()?;
    let lon: f64 = lon_text.trim().parse().ok()?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some(Location::new(lon, lat))
}
