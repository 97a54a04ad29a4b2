//! Map surface module: the only code with rendering side effects
//!
//! - [`viewport`]: the command surface that owns camera state, highlight
//!   filters and the marker; everything else mutates the map through it
//! - [`plugin`]: the walkers layer plugin that paints district fills,
//!   borders, highlights and the marker, and performs pointer hit-testing
//! - [`sync`]: the selection synchronization state machine between the
//!   external selection store and the viewport

pub mod plugin;
pub mod sync;
pub mod viewport;

pub use plugin::{DistrictLayerPlugin, MapEvents};
pub use sync::{SelectionSnapshot, SelectionSync, StoreRequest, SyncState};
pub use viewport::ViewportController;
