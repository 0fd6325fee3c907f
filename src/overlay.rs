//! Popup and tooltip factories: wrap arbitrary child content into
//! descriptors and announce them. Empty content is allowed; a factory with
//! no children still produces its one signal.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::attr;
use crate::element::{Content, Element};
use crate::signal::Signal;

/// Tooltip placement relative to the marker, mirroring the engine's
/// supported directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Auto,
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Direction {
    /// Parse a `direction` attribute value. Unknown values fall back to
    /// `Auto`; only anchors and coordinates fail hard.
    #[must_use]
    pub fn from_attr(raw: &str) -> Self {
        match raw {
            "auto" => Self::Auto,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "center" => Self::Center,
            other => {
                tracing::warn!(direction = other, "unknown tooltip direction, using auto");
                Self::Auto
            }
        }
    }

    /// The attribute spelling of this direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// Tooltip content plus placement.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipDescriptor {
    pub content: Content,
    pub direction: Direction,
}

/// Connect a popup element: capture its subtree and announce it.
#[must_use]
pub fn connect_popup(el: Element) -> Signal {
    Signal::Popup(el.capture_content())
}

/// Connect a tooltip element: capture its subtree and the optional
/// `direction` attribute, then announce.
#[must_use]
pub fn connect_tooltip(el: Element) -> Signal {
    let direction = Direction::from_attr(&attr::read_string(&el, "direction", "auto"));
    Signal::Tooltip(TooltipDescriptor {
        content: el.capture_content(),
        direction,
    })
}
