//! Selection synchronization state machine
//!
//! Keeps the rendered map, the transient hover state and the external
//! selection store mutually consistent. External store changes flow in
//! through [`SelectionSync::apply_store`]; pointer gestures flow back out as
//! [`StoreRequest`]s for the store to adopt on its next update, never
//! synchronously.
//!
//! Feedback loops are prevented by explicit prior-state guards
//! (`last_location`, `last_district`): a transition only fires when the
//! relevant field's new value differs from its last-processed value. In
//! particular, the district id change produced by resolving a location does
//! not trigger a second resolution when it echoes back from the store.

use crate::districts::{resolve, DistrictId, DistrictIndex, Location};
use crate::map::viewport::ViewportController;

/// Where the machine currently is. `LocationPending` covers both "resolution
/// just requested" and "the searched point matched no district" (marker
/// shown, nothing highlighted).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyncState {
    Idle,
    LocationPending,
    DistrictSelected(DistrictId),
}

/// The district id (if any) under the pointer, plus the screen point for
/// tooltip placement. Ephemeral; reset on pointer-leave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverState {
    pub id: DistrictId,
    pub screen: egui::Pos2,
}

/// Read-only view of the external selection store.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionSnapshot {
    pub location: Option<Location>,
    pub district: Option<DistrictId>,
}

/// A request for the external store, identical in shape whether it came from
/// a direct district click or from location resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoreRequest {
    SelectDistrict(Option<DistrictId>),
}

pub struct SelectionSync {
    state: SyncState,
    last_location: Option<Location>,
    last_district: Option<DistrictId>,
    hover: Option<HoverState>,
}

impl Default for SelectionSync {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSync {
    pub fn new() -> Self {
        Self {
            state: SyncState::Idle,
            last_location: None,
            last_district: None,
            hover: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn hover(&self) -> Option<HoverState> {
        self.hover
    }

    /// Reconcile an external store snapshot against the last-processed one,
    /// issuing viewport commands and at most one store request.
    pub fn apply_store(
        &mut self,
        snapshot: SelectionSnapshot,
        index: &DistrictIndex,
        viewport: &mut ViewportController,
    ) -> Option<StoreRequest> {
        // Transition 1: a new location arrived from the search collaborator.
        // The marker is placed regardless of whether the point resolves.
        if snapshot.location != self.last_location {
            self.last_location = snapshot.location;
            if let Some(location) = snapshot.location {
                viewport.place_marker(Some(location));
                self.state = SyncState::LocationPending;

                let resolved = resolve::selectable_district_for_point(location.point(), index);
                match resolved {
                    Some(id) => {
                        tracing::debug!(district = id.code(), "Resolved searched location")
                    }
                    None => tracing::info!(
                        lon = location.lon,
                        lat = location.lat,
                        "Searched location is outside every district"
                    ),
                }
                // The store echoes the id back as a district change; the
                // guard above keeps that echo from re-resolving.
                return Some(StoreRequest::SelectDistrict(resolved));
            }
        }

        // Transitions 2 and 3: the canonical district id changed.
        if snapshot.district != self.last_district {
            self.last_district = snapshot.district;
            viewport.set_selection_highlight(snapshot.district);

            match snapshot.district {
                Some(id) => {
                    self.state = SyncState::DistrictSelected(id);
                    match resolve::bounds_for_district(id, index) {
                        Some(bounds) => viewport.frame_bounds(bounds, true),
                        None => tracing::debug!(
                            district = id.code(),
                            "No geometry for district, leaving viewport unchanged"
                        ),
                    }
                }
                None if snapshot.location.is_some() => {
                    // The searched point matched no district: keep the marker,
                    // highlight nothing.
                    self.state = SyncState::LocationPending;
                }
                None => {
                    self.state = SyncState::Idle;
                    viewport.place_marker(None);
                    viewport.frame_default_region(true);
                }
            }
        } else if snapshot.location.is_none()
            && snapshot.district.is_none()
            && self.state != SyncState::Idle
        {
            // Cleared while the district was already unset (a location-only
            // selection was dropped).
            self.state = SyncState::Idle;
            viewport.set_selection_highlight(None);
            viewport.place_marker(None);
            viewport.frame_default_region(true);
        }

        None
    }

    /// Transition 4: the pointer moved over a selectable fill.
    pub fn pointer_moved(
        &mut self,
        id: DistrictId,
        screen: egui::Pos2,
        viewport: &mut ViewportController,
    ) {
        self.hover = Some(HoverState { id, screen });
        viewport.set_hover_highlight(Some(id));
    }

    /// Transition 5: the pointer left the fill layer.
    pub fn pointer_left(&mut self, viewport: &mut ViewportController) {
        self.hover = None;
        viewport.set_hover_highlight(None);
    }

    /// Transition 6: a click on a selectable fill. The returned request is
    /// acted on at the next external store update.
    pub fn clicked(&self, id: DistrictId) -> StoreRequest {
        StoreRequest::SelectDistrict(Some(id))
    }
}
