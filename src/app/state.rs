//! Application state: the external selection store and runtime UI settings

use crate::districts::{DistrictId, Location};
use crate::map::sync::SelectionSnapshot;

/// The canonical selection state container. The map core only reads
/// snapshots of it and requests transitions; it never mutates the store
/// directly.
#[derive(Debug, Default)]
pub struct SelectionStore {
    location: Option<Location>,
    district: Option<DistrictId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            location: self.location,
            district: self.district,
        }
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn district(&self) -> Option<DistrictId> {
        self.district
    }

    /// Adopt a searched location. The containing district (if any) follows
    /// through the resolution request issued by the sync machine.
    pub fn select_location(&mut self, location: Location) {
        self.location = Some(location);
        self.district = None;
    }

    /// Adopt a district id as the canonical selection; `None` records that
    /// the current location resolved to no district.
    pub fn select_district(&mut self, district: Option<DistrictId>) {
        self.district = district;
    }

    pub fn clear(&mut self) {
        self.location = None;
        self.district = None;
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.district.is_none()
    }
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TilesProvider {
    OpenStreetMap,
    OpenTopoMap,
}

impl TilesProvider {
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "© OpenStreetMap contributors",
            Self::OpenTopoMap => "© OpenTopoMap (CC-BY-SA)",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::OpenStreetMap, Self::OpenTopoMap]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::OpenTopoMap => "OpenTopoMap",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "OpenTopoMap" => Self::OpenTopoMap,
            _ => Self::OpenStreetMap,
        }
    }
}

/// UI-specific settings that can be adjusted at runtime
pub struct UiSettings {
    /// Map tiles provider
    pub tiles_provider: TilesProvider,

    /// Coordinate search input ("latitude, longitude")
    pub search_text: String,

    /// Feedback for an unparseable search input
    pub search_error: Option<String>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tiles_provider: TilesProvider::OpenStreetMap,
            search_text: String::new(),
            search_error: None,
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    /// The external selection store
    pub store: SelectionStore,

    /// Current UI settings
    pub ui_settings: UiSettings,
}
