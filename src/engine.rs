//! The mapping-engine boundary.
//!
//! The composition core never renders tiles, projects coordinates, or
//! clusters markers itself; it only decides when the engine is invoked and
//! with what data. [`Engine`] is that boundary. The split also fixes the
//! ownership rules: marker content is mutated only through the assembler
//! that owns the marker, placement and clustering only through the host.

use uuid::Uuid;

use crate::element::Content;
use crate::geo::{LatLng, MapView, Size};
use crate::icon::IconDescriptor;
use crate::overlay::TooltipDescriptor;

/// Handle to one live marker owned by the engine.
pub type MarkerId = Uuid;

/// Handle to a registered marker-event listener.
pub type ListenerId = Uuid;

/// Handle to a resize-observer subscription.
pub type ObserverId = Uuid;

/// Marker interaction events an assembler can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEventKind {
    MouseOver,
    MouseOut,
    PopupOpen,
    PopupClose,
}

/// An engine-originated event on a live marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEvent {
    pub marker: MarkerId,
    pub kind: MarkerEventKind,
}

/// Externally loaded resources the host waits on. Completion and failure
/// are reported back through the composer; loads are unordered relative to
/// marker construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stylesheet,
    ClusterScript,
}

/// The mapping engine as seen by the composition core.
///
/// Implementations own all rendering; every method is a one-shot
/// instruction with no retry semantics.
pub trait Engine {
    /// Create the viewport bound to a root node of `size`.
    fn create_map(&mut self, view: MapView, size: Size);

    /// Recompute viewport layout after a container size change.
    /// Idempotent: repeated calls with the same size cause no corruption.
    fn invalidate_size(&mut self, size: Size);

    /// Begin an asynchronous resource load. Completion arrives later via
    /// the composer; there is no cancellation.
    fn request_resource(&mut self, kind: ResourceKind);

    /// Create a live marker at `position`. The marker is not yet on the
    /// map; placement happens through the cluster layer or
    /// [`Engine::place_marker`].
    fn create_marker(&mut self, position: LatLng) -> MarkerId;

    /// Drop a live marker and remove it from the map.
    fn remove_marker(&mut self, marker: MarkerId);

    fn set_icon(&mut self, marker: MarkerId, icon: &IconDescriptor);

    fn bind_popup(&mut self, marker: MarkerId, content: &Content);

    fn bind_tooltip(&mut self, marker: MarkerId, tooltip: &TooltipDescriptor);

    fn close_tooltip(&mut self, marker: MarkerId);

    /// Whether the marker's popup is currently open.
    fn is_popup_open(&self, marker: MarkerId) -> bool;

    /// Place a marker directly on the map, bypassing clustering.
    fn place_marker(&mut self, marker: MarkerId);

    /// Initialize the clustering layer. Called once, only after the
    /// clustering script has loaded.
    fn init_cluster(&mut self);

    /// Hand a marker to the clustering layer.
    fn cluster_marker(&mut self, marker: MarkerId);

    /// Release the clustering layer's resources.
    fn release_cluster(&mut self);

    /// Register interest in a marker event. The returned handle must be
    /// passed to [`Engine::remove_listener`] when the marker leaves the
    /// document; the engine does not release listeners automatically.
    fn add_listener(&mut self, marker: MarkerId, kind: MarkerEventKind) -> ListenerId;

    fn remove_listener(&mut self, listener: ListenerId);

    /// Subscribe to container size changes.
    fn observe_resize(&mut self) -> ObserverId;

    fn unobserve_resize(&mut self, observer: ObserverId);
}
