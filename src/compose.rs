//! Document composition: connects element trees and routes signals.
//!
//! DESIGN
//! ======
//! The composer is the seam between the declarative tree and the live map.
//! It connects elements in document order, resolves each factory signal to
//! its nearest marker ancestor (the host when no marker encloses it), and
//! drains the channel so application happens in emission order. Independent
//! subtrees may connect in any order, including after their marker has
//! already announced; the relative order of sibling factories is never
//! relied upon.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use std::collections::HashMap;

use crate::attr::AttrError;
use crate::element::{Element, ElementKind, Node};
use crate::engine::{Engine, MarkerEvent, MarkerId, ResourceKind};
use crate::geo::{MapView, Size};
use crate::host::MapHost;
use crate::icon;
use crate::marker::MarkerAssembler;
use crate::overlay;
use crate::signal::{Scope, Signal, SignalChannel};

/// Owns the engine, the host, and every live marker assembler.
pub struct Composer<E: Engine> {
    engine: E,
    host: Option<MapHost>,
    markers: HashMap<MarkerId, MarkerAssembler>,
    channel: SignalChannel,
}

impl<E: Engine> Composer<E> {
    /// Wrap an engine. No viewport exists until a document is mounted.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            host: None,
            markers: HashMap::new(),
            channel: SignalChannel::new(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub fn host(&self) -> Option<&MapHost> {
        self.host.as_ref()
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerAssembler> {
        self.markers.get(&id)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Mount a document tree rooted at the host element. `size` is the
    /// host container's computed dimensions. One document per composer;
    /// mounting again unmounts the previous one first.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal attribute error. The failing element
    /// leaves no marker and no listeners behind; elements connected before
    /// it stay mounted.
    pub fn mount(&mut self, root: Element, view: MapView, size: Size) -> Result<(), AttrError> {
        if self.host.is_some() {
            self.unmount();
        }
        self.host = Some(MapHost::connect(view, size, &mut self.engine));
        let result = root
            .into_children()
            .into_iter()
            .try_for_each(|child| self.connect_node(child, Scope::Host));
        self.pump();
        result
    }

    /// Connect a late-arriving element beneath an already-connected
    /// marker. The marker may have announced long ago; its content still
    /// updates.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::mount`].
    pub fn connect_into(&mut self, marker: MarkerId, el: Element) -> Result<(), AttrError> {
        let result = self.connect_node(Node::Element(el), Scope::Marker(marker));
        self.pump();
        result
    }

    /// Connect one node beneath `scope`, then its subtree in document
    /// order.
    fn connect_node(&mut self, node: Node, scope: Scope) -> Result<(), AttrError> {
        let el = match node {
            Node::Element(el) => el,
            // Bare text between elements contributes nothing here.
            Node::Text(_) => return Ok(()),
        };
        match el.kind() {
            ElementKind::Marker => {
                let mut assembler = MarkerAssembler::connect(&el, &mut self.engine)?;
                assembler.announce(&mut self.channel);
                let id = assembler.id();
                self.markers.insert(id, assembler);
                for child in el.into_children() {
                    self.connect_node(child, Scope::Marker(id))?;
                }
            }
            ElementKind::Icon => {
                let signal = icon::connect(el)?;
                self.channel.emit(scope, signal);
            }
            ElementKind::Popup => self.channel.emit(scope, overlay::connect_popup(el)),
            ElementKind::Tooltip => self.channel.emit(scope, overlay::connect_tooltip(el)),
            // Container markup: descend with the same scope.
            ElementKind::Map | ElementKind::Other => {
                for child in el.into_children() {
                    self.connect_node(child, scope)?;
                }
            }
        }
        Ok(())
    }

    /// Drain the channel, dispatching each envelope to its scope.
    fn pump(&mut self) {
        while let Some(envelope) = self.channel.pop() {
            match envelope.scope {
                Scope::Host => match envelope.signal {
                    Signal::Marker(id) => {
                        if let Some(host) = &mut self.host {
                            host.on_marker(id, &mut self.engine);
                        } else {
                            tracing::warn!(marker = %id, "marker announced with no host mounted");
                        }
                    }
                    other => {
                        tracing::debug!(
                            kind = ?other.kind(),
                            "signal reached the host scope unconsumed, dropping"
                        );
                    }
                },
                Scope::Marker(id) => {
                    if let Some(assembler) = self.markers.get_mut(&id) {
                        assembler.apply(envelope.signal, &mut self.engine);
                    } else {
                        tracing::warn!(marker = %id, "signal for unknown marker dropped");
                    }
                }
            }
        }
    }

    /// Route an engine event to the assembler owning the marker.
    pub fn engine_event(&mut self, event: MarkerEvent) {
        if let Some(assembler) = self.markers.get_mut(&event.marker) {
            assembler.on_event(event.kind, &mut self.engine);
        }
    }

    /// A resource load completed.
    pub fn resource_loaded(&mut self, kind: ResourceKind) {
        if let Some(host) = &mut self.host {
            host.resource_loaded(kind, &mut self.engine);
        }
    }

    /// A resource load failed.
    pub fn resource_failed(&mut self, kind: ResourceKind) {
        if let Some(host) = &mut self.host {
            host.resource_failed(kind, &mut self.engine);
        }
    }

    /// The host container's size changed.
    pub fn container_resized(&mut self, size: Size) {
        if let Some(host) = &mut self.host {
            host.resized(size, &mut self.engine);
        }
    }

    /// Remove one marker from the document: its listeners detach and the
    /// live marker is dropped.
    pub fn remove_marker(&mut self, marker: MarkerId) {
        if let Some(mut assembler) = self.markers.remove(&marker) {
            assembler.detach(&mut self.engine);
        }
    }

    /// Unmount the document: every marker detaches, then the host releases
    /// the clustering layer and the resize subscription.
    pub fn unmount(&mut self) {
        let ids: Vec<MarkerId> = self.markers.keys().copied().collect();
        for id in ids {
            self.remove_marker(id);
        }
        if let Some(mut host) = self.host.take() {
            host.disconnect(&mut self.engine);
        }
    }
}
