//! Icon factory: builds an icon descriptor from an icon element.

#[cfg(test)]
#[path = "icon_test.rs"]
mod icon_test;

use crate::attr::{self, AttrError};
use crate::consts::{
    DEFAULT_ICON_ANCHOR, DEFAULT_ICON_URL, DEFAULT_POPUP_ANCHOR, HOVER_ICON_CLASS,
};
use crate::element::{Content, Element};
use crate::geo::Anchor;
use crate::signal::Signal;

/// Immutable icon description. A marker may hold up to two of these, one
/// default and one hover.
#[derive(Debug, Clone, PartialEq)]
pub struct IconDescriptor {
    /// Captured subtree displayed as the icon.
    pub content: Content,
    /// Pixel offset of the icon's tip relative to the marker position.
    pub icon_anchor: Anchor,
    /// Pixel offset applied to a popup opened over this icon.
    pub popup_anchor: Anchor,
    /// Class applied to the engine's icon element.
    pub style_class: String,
}

/// Connect an icon element: read anchors, capture content, and produce the
/// single readiness signal. The `hover` class token selects the hover-icon
/// role; the element never inspects its ancestors.
///
/// # Errors
///
/// [`AttrError::MalformedAnchor`] aborts the element; no signal is
/// produced and no state is left behind.
pub fn connect(el: Element) -> Result<Signal, AttrError> {
    let hover = el.has_class(HOVER_ICON_CLASS);
    let anchor_name = if hover { "hover-icon-anchor" } else { "icon-anchor" };
    let icon_anchor = attr::read_anchor(&el, anchor_name, DEFAULT_ICON_ANCHOR)?;
    let popup_anchor = attr::read_anchor(&el, "popup-anchor", DEFAULT_POPUP_ANCHOR)?;
    let style_class = attr::read_string(&el, "class", "");

    let descriptor = IconDescriptor {
        content: el.capture_content(),
        icon_anchor,
        popup_anchor,
        style_class,
    };

    Ok(if hover {
        Signal::HoverIcon(descriptor)
    } else {
        Signal::Icon(descriptor)
    })
}

/// The stock icon element, used by documents that supply no icon of their
/// own. Connecting it yields the default anchors and the bundled marker
/// image.
#[must_use]
pub fn default_element() -> Element {
    Element::icon().with_child(Element::new("img").with_attr("src", DEFAULT_ICON_URL))
}
