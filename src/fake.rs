//! Recording engine fake shared by module tests.
//!
//! Every trait call appends to `calls` so tests can assert ordering (drain
//! order, listener bookkeeping, icon swaps); richer per-marker state lives
//! in `markers` for direct inspection.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::element::Content;
use crate::engine::{
    Engine, ListenerId, MarkerEventKind, MarkerId, ObserverId, ResourceKind,
};
use crate::geo::{LatLng, MapView, Size};
use crate::icon::IconDescriptor;
use crate::overlay::TooltipDescriptor;

/// One recorded engine call. Payloads carry just enough to assert order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateMap(MapView, Size),
    InvalidateSize(Size),
    RequestResource(ResourceKind),
    CreateMarker(MarkerId),
    RemoveMarker(MarkerId),
    SetIcon(MarkerId),
    BindPopup(MarkerId),
    BindTooltip(MarkerId),
    CloseTooltip(MarkerId),
    PlaceMarker(MarkerId),
    InitCluster,
    ClusterMarker(MarkerId),
    ReleaseCluster,
    AddListener(MarkerId, MarkerEventKind),
    RemoveListener(ListenerId),
    ObserveResize,
    UnobserveResize(ObserverId),
}

/// Live per-marker state as the fake engine sees it.
#[derive(Debug, Clone, Default)]
pub struct FakeMarker {
    pub position: Option<LatLng>,
    pub icon: Option<IconDescriptor>,
    pub popup: Option<Content>,
    pub tooltip: Option<TooltipDescriptor>,
    pub tooltip_open: bool,
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub calls: Vec<Call>,
    pub markers: HashMap<MarkerId, FakeMarker>,
    pub clustered: Vec<MarkerId>,
    pub placed: Vec<MarkerId>,
    pub listeners: HashMap<ListenerId, (MarkerId, MarkerEventKind)>,
    pub observers: HashSet<ObserverId>,
    pub popups_open: HashSet<MarkerId>,
    pub cluster_ready: bool,
    pub cluster_released: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, id: MarkerId) -> &FakeMarker {
        &self.markers[&id]
    }

    /// Simulate the engine opening or closing a marker's popup.
    pub fn set_popup_open(&mut self, id: MarkerId, open: bool) {
        if open {
            self.popups_open.insert(id);
        } else {
            self.popups_open.remove(&id);
        }
    }

    /// Event kinds currently listened for on `id`.
    pub fn listener_kinds(&self, id: MarkerId) -> Vec<MarkerEventKind> {
        self.listeners
            .values()
            .filter(|(marker, _)| *marker == id)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Recorded calls matching a predicate, in order.
    pub fn calls_where(&self, pred: impl Fn(&Call) -> bool) -> Vec<Call> {
        self.calls.iter().filter(|c| pred(c)).cloned().collect()
    }
}

impl Engine for FakeEngine {
    fn create_map(&mut self, view: MapView, size: Size) {
        self.calls.push(Call::CreateMap(view, size));
    }

    fn invalidate_size(&mut self, size: Size) {
        self.calls.push(Call::InvalidateSize(size));
    }

    fn request_resource(&mut self, kind: ResourceKind) {
        self.calls.push(Call::RequestResource(kind));
    }

    fn create_marker(&mut self, position: LatLng) -> MarkerId {
        let id = Uuid::new_v4();
        self.markers.insert(
            id,
            FakeMarker { position: Some(position), ..FakeMarker::default() },
        );
        self.calls.push(Call::CreateMarker(id));
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
        self.calls.push(Call::RemoveMarker(marker));
    }

    fn set_icon(&mut self, marker: MarkerId, icon: &IconDescriptor) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.icon = Some(icon.clone());
        }
        self.calls.push(Call::SetIcon(marker));
    }

    fn bind_popup(&mut self, marker: MarkerId, content: &Content) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.popup = Some(content.clone());
        }
        self.calls.push(Call::BindPopup(marker));
    }

    fn bind_tooltip(&mut self, marker: MarkerId, tooltip: &TooltipDescriptor) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.tooltip = Some(tooltip.clone());
            state.tooltip_open = true;
        }
        self.calls.push(Call::BindTooltip(marker));
    }

    fn close_tooltip(&mut self, marker: MarkerId) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.tooltip_open = false;
        }
        self.calls.push(Call::CloseTooltip(marker));
    }

    fn is_popup_open(&self, marker: MarkerId) -> bool {
        self.popups_open.contains(&marker)
    }

    fn place_marker(&mut self, marker: MarkerId) {
        self.placed.push(marker);
        self.calls.push(Call::PlaceMarker(marker));
    }

    fn init_cluster(&mut self) {
        self.cluster_ready = true;
        self.calls.push(Call::InitCluster);
    }

    fn cluster_marker(&mut self, marker: MarkerId) {
        self.clustered.push(marker);
        self.calls.push(Call::ClusterMarker(marker));
    }

    fn release_cluster(&mut self) {
        self.cluster_released = true;
        self.calls.push(Call::ReleaseCluster);
    }

    fn add_listener(&mut self, marker: MarkerId, kind: MarkerEventKind) -> ListenerId {
        let id = Uuid::new_v4();
        self.listeners.insert(id, (marker, kind));
        self.calls.push(Call::AddListener(marker, kind));
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
        self.calls.push(Call::RemoveListener(listener));
    }

    fn observe_resize(&mut self) -> ObserverId {
        let id = Uuid::new_v4();
        self.observers.insert(id);
        self.calls.push(Call::ObserveResize);
        id
    }

    fn unobserve_resize(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
        self.calls.push(Call::UnobserveResize(observer));
    }
}
