//! Marker assembly: one logical marker, built from descendant readiness
//! signals and mutated live as they arrive.
//!
//! DESIGN
//! ======
//! A marker announces itself as soon as it connects. It does not wait for
//! descendant icon/popup/tooltip elements, whose construction order is not
//! guaranteed, so signals arriving after the announcement mutate the live
//! marker in place. Per-kind application is idempotent: a second signal of
//! the same kind replaces the prior value instead of accumulating.
//! Listener registration follows the content: the default icon brings the
//! revert listeners, the hover icon the swap listener, the tooltip the
//! popup-precedence listener. Disconnecting detaches exactly what was
//! registered.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use crate::attr::{self, AttrError};
use crate::element::{Content, Element};
use crate::engine::{Engine, ListenerId, MarkerEventKind, MarkerId};
use crate::geo::LatLng;
use crate::icon::IconDescriptor;
use crate::overlay::TooltipDescriptor;
use crate::signal::{Scope, Signal, SignalChannel};

/// Assembles and owns the content of one live marker.
#[derive(Debug)]
pub struct MarkerAssembler {
    id: MarkerId,
    position: LatLng,
    icon: Option<IconDescriptor>,
    hover_icon: Option<IconDescriptor>,
    popup: Option<Content>,
    tooltip: Option<TooltipDescriptor>,
    listeners: Vec<ListenerId>,
    registered: Vec<MarkerEventKind>,
    announced: bool,
}

impl MarkerAssembler {
    /// Connect a marker element: parse the required coordinate pair, then
    /// create the live engine marker.
    ///
    /// Coordinate parsing happens before any engine call, so a failure
    /// leaves no marker and no listeners behind.
    ///
    /// # Errors
    ///
    /// [`AttrError::MissingCoordinate`] if either attribute is absent or
    /// not numeric. Zero is a valid coordinate.
    pub fn connect(el: &Element, engine: &mut impl Engine) -> Result<Self, AttrError> {
        let position = attr::read_coordinate(el, "latitude", "longitude")?;
        let id = engine.create_marker(position);
        Ok(Self {
            id,
            position,
            icon: None,
            hover_icon: None,
            popup: None,
            tooltip: None,
            listeners: Vec::new(),
            registered: Vec::new(),
            announced: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> MarkerId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> LatLng {
        self.position
    }

    #[must_use]
    pub fn icon(&self) -> Option<&IconDescriptor> {
        self.icon.as_ref()
    }

    #[must_use]
    pub fn hover_icon(&self) -> Option<&IconDescriptor> {
        self.hover_icon.as_ref()
    }

    #[must_use]
    pub fn popup(&self) -> Option<&Content> {
        self.popup.as_ref()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipDescriptor> {
        self.tooltip.as_ref()
    }

    /// Announce the marker to whatever host encloses it. Emits exactly
    /// once per connection; later calls are no-ops.
    pub fn announce(&mut self, channel: &mut SignalChannel) {
        if self.announced {
            return;
        }
        self.announced = true;
        channel.emit(Scope::Host, Signal::Marker(self.id));
    }

    /// Apply a descendant readiness signal to the live marker.
    pub fn apply(&mut self, signal: Signal, engine: &mut impl Engine) {
        match signal {
            Signal::Icon(icon) => self.apply_icon(icon, engine),
            Signal::HoverIcon(icon) => self.apply_hover_icon(icon, engine),
            Signal::Popup(content) => self.apply_popup(content, engine),
            Signal::Tooltip(tooltip) => self.apply_tooltip(tooltip, engine),
            // A marker announcement never targets another marker.
            Signal::Marker(id) => {
                tracing::debug!(marker = %id, "marker signal delivered to a marker scope, ignoring");
            }
        }
    }

    fn apply_icon(&mut self, icon: IconDescriptor, engine: &mut impl Engine) {
        engine.set_icon(self.id, &icon);
        self.icon = Some(icon);
        // Reverting to the default icon is driven by these two events.
        self.listen_once(MarkerEventKind::MouseOut, engine);
        self.listen_once(MarkerEventKind::PopupClose, engine);
    }

    fn apply_hover_icon(&mut self, icon: IconDescriptor, engine: &mut impl Engine) {
        self.hover_icon = Some(icon);
        self.listen_once(MarkerEventKind::MouseOver, engine);
    }

    fn apply_popup(&mut self, content: Content, engine: &mut impl Engine) {
        engine.bind_popup(self.id, &content);
        self.popup = Some(content);
    }

    fn apply_tooltip(&mut self, tooltip: TooltipDescriptor, engine: &mut impl Engine) {
        engine.bind_tooltip(self.id, &tooltip);
        self.tooltip = Some(tooltip);
        // An open popup takes visual precedence over the tooltip.
        self.listen_once(MarkerEventKind::PopupOpen, engine);
    }

    /// React to an engine event on this marker.
    pub fn on_event(&mut self, kind: MarkerEventKind, engine: &mut impl Engine) {
        match kind {
            MarkerEventKind::MouseOver => {
                if let Some(hover) = &self.hover_icon {
                    engine.set_icon(self.id, hover);
                }
            }
            MarkerEventKind::MouseOut => {
                // With the popup open the hover icon stays; the
                // popup-close event performs the revert instead.
                if !engine.is_popup_open(self.id) {
                    if let Some(icon) = &self.icon {
                        engine.set_icon(self.id, icon);
                    }
                }
            }
            MarkerEventKind::PopupOpen => {
                if self.tooltip.is_some() {
                    engine.close_tooltip(self.id);
                }
            }
            MarkerEventKind::PopupClose => {
                if let Some(icon) = &self.icon {
                    engine.set_icon(self.id, icon);
                }
            }
        }
    }

    /// Detach every listener this assembler registered, then drop the live
    /// marker. Called when the marker element leaves the document.
    pub fn detach(&mut self, engine: &mut impl Engine) {
        for listener in self.listeners.drain(..) {
            engine.remove_listener(listener);
        }
        self.registered.clear();
        engine.remove_marker(self.id);
    }

    /// Register a listener for `kind` unless one already exists. Replacing
    /// content of a kind must not stack duplicate listeners.
    fn listen_once(&mut self, kind: MarkerEventKind, engine: &mut impl Engine) {
        if self.registered.contains(&kind) {
            return;
        }
        self.registered.push(kind);
        self.listeners.push(engine.add_listener(self.id, kind));
    }
}
