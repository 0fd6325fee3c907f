//! Map host: render scope, viewport lifecycle, and the cluster gate.
//!
//! DESIGN
//! ======
//! Marker announcements can legitimately fire before the clustering script
//! has finished loading. The host therefore runs a three-state gate: while
//! the script loads, announcements append to an ordered buffer; when the
//! script reports loaded, the buffer drains into the clustering layer
//! exactly once and later announcements forward directly. A failed script
//! load degrades the gate to placing markers straight on the map,
//! un-clustered. Markers are never dropped on the floor and the clustering
//! layer is never touched before it exists.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use crate::engine::{Engine, MarkerId, ObserverId, ResourceKind};
use crate::geo::{MapView, Size};

/// Load state of one external resource in the render scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// The isolated rendering scope the host owns: a root node sized to the
/// host's computed dimensions plus the style and script resources loaded
/// into it, kept apart from the embedding page.
#[derive(Debug)]
pub struct RenderScope {
    size: Size,
    stylesheet: ResourceState,
    cluster_script: ResourceState,
}

impl RenderScope {
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn stylesheet(&self) -> ResourceState {
        self.stylesheet
    }

    #[must_use]
    pub fn cluster_script(&self) -> ResourceState {
        self.cluster_script
    }
}

/// Gate between marker announcements and the clustering layer.
#[derive(Debug)]
enum ClusterGate {
    /// Script still loading; announcements buffer in arrival order.
    Loading { buffer: Vec<MarkerId> },
    /// Script loaded; announcements forward directly.
    Ready,
    /// Script failed; markers go straight onto the map, un-clustered.
    Degraded,
}

/// Owns the map viewport and places announced markers.
///
/// The only mutation descendants can apply to the host is a marker
/// announcement; all marker content stays with the assemblers.
#[derive(Debug)]
pub struct MapHost {
    view: MapView,
    scope: RenderScope,
    gate: ClusterGate,
    observer: ObserverId,
}

impl MapHost {
    /// Connect the host: begin the resource loads, create the viewport
    /// bound to a root of `size`, and subscribe to container resizes.
    pub fn connect(view: MapView, size: Size, engine: &mut impl Engine) -> Self {
        engine.request_resource(ResourceKind::Stylesheet);
        engine.request_resource(ResourceKind::ClusterScript);
        engine.create_map(view, size);
        let observer = engine.observe_resize();
        Self {
            view,
            scope: RenderScope {
                size,
                stylesheet: ResourceState::Pending,
                cluster_script: ResourceState::Pending,
            },
            gate: ClusterGate::Loading { buffer: Vec::new() },
            observer,
        }
    }

    #[must_use]
    pub fn view(&self) -> MapView {
        self.view
    }

    #[must_use]
    pub fn scope(&self) -> &RenderScope {
        &self.scope
    }

    /// Accept a marker announcement.
    pub fn on_marker(&mut self, marker: MarkerId, engine: &mut impl Engine) {
        match &mut self.gate {
            ClusterGate::Loading { buffer } => buffer.push(marker),
            ClusterGate::Ready => engine.cluster_marker(marker),
            ClusterGate::Degraded => engine.place_marker(marker),
        }
    }

    /// A resource finished loading.
    pub fn resource_loaded(&mut self, kind: ResourceKind, engine: &mut impl Engine) {
        match kind {
            ResourceKind::Stylesheet => self.scope.stylesheet = ResourceState::Loaded,
            ResourceKind::ClusterScript => {
                self.scope.cluster_script = ResourceState::Loaded;
                self.open_gate(engine);
            }
        }
    }

    /// A resource failed to load. A missing stylesheet only affects
    /// presentation; a missing cluster script degrades the gate so markers
    /// still reach the map.
    pub fn resource_failed(&mut self, kind: ResourceKind, engine: &mut impl Engine) {
        match kind {
            ResourceKind::Stylesheet => {
                self.scope.stylesheet = ResourceState::Failed;
                tracing::warn!("map stylesheet failed to load, rendering unstyled");
            }
            ResourceKind::ClusterScript => {
                self.scope.cluster_script = ResourceState::Failed;
                tracing::warn!("cluster script failed to load, placing markers unclustered");
                match std::mem::replace(&mut self.gate, ClusterGate::Degraded) {
                    ClusterGate::Loading { buffer } => {
                        for marker in buffer {
                            engine.place_marker(marker);
                        }
                    }
                    // Already clustering; a late failure report changes nothing.
                    ClusterGate::Ready => self.gate = ClusterGate::Ready,
                    ClusterGate::Degraded => {}
                }
            }
        }
    }

    /// Drain the buffer into the clustering layer, exactly once. The gate
    /// never returns to `Loading`.
    fn open_gate(&mut self, engine: &mut impl Engine) {
        match std::mem::replace(&mut self.gate, ClusterGate::Ready) {
            ClusterGate::Loading { buffer } => {
                engine.init_cluster();
                for marker in buffer {
                    engine.cluster_marker(marker);
                }
            }
            // Duplicate load report; keep whatever state we were in.
            other => self.gate = other,
        }
    }

    /// Container size changed. Covers layout finishing after initial
    /// attachment; recomputing with an unchanged size is skipped.
    pub fn resized(&mut self, size: Size, engine: &mut impl Engine) {
        if size == self.scope.size {
            return;
        }
        self.scope.size = size;
        engine.invalidate_size(size);
    }

    /// Release the clustering layer and the resize subscription. Called
    /// when the host leaves the document.
    pub fn disconnect(&mut self, engine: &mut impl Engine) {
        engine.release_cluster();
        engine.unobserve_resize(self.observer);
    }
}
