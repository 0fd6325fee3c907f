//! The declarative element tree consumed by the composition runtime.
//!
//! An [`Element`] is the markup-shaped input: a tag, attributes, and child
//! nodes. The composer walks a tree of these in document order; factory
//! elements are consumed on connection, capturing their subtree as
//! [`Content`] whose ownership transfers to whichever marker binds it.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

/// The element vocabulary the composer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `leaflet-map`: hosts the viewport and the cluster gate.
    Map,
    /// `leaflet-marker`: one logical marker.
    Marker,
    /// `leaflet-icon`: icon or hover-icon content.
    Icon,
    /// `leaflet-popup`: popup content.
    Popup,
    /// `leaflet-tooltip`: tooltip content.
    Tooltip,
    /// Anything else: plain markup, passed through as renderable content.
    Other,
}

impl ElementKind {
    /// Map a tag name onto the vocabulary. Unrecognized tags are `Other`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "leaflet-map" => Self::Map,
            "leaflet-marker" => Self::Marker,
            "leaflet-icon" => Self::Icon,
            "leaflet-popup" => Self::Popup,
            "leaflet-tooltip" => Self::Tooltip,
            _ => Self::Other,
        }
    }
}

/// One child position in an element: nested markup or bare text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A markup element: tag, attributes, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attrs: Vec::new(), children: Vec::new() }
    }

    /// A `leaflet-map` element.
    #[must_use]
    pub fn map() -> Self {
        Self::new("leaflet-map")
    }

    /// A `leaflet-marker` element at the given position.
    #[must_use]
    pub fn marker(lat: f64, lng: f64) -> Self {
        Self::new("leaflet-marker")
            .with_attr("latitude", lat.to_string())
            .with_attr("longitude", lng.to_string())
    }

    /// A `leaflet-icon` element.
    #[must_use]
    pub fn icon() -> Self {
        Self::new("leaflet-icon")
    }

    /// A `leaflet-popup` element.
    #[must_use]
    pub fn popup() -> Self {
        Self::new("leaflet-popup")
    }

    /// A `leaflet-tooltip` element.
    #[must_use]
    pub fn tooltip() -> Self {
        Self::new("leaflet-tooltip")
    }

    /// Set an attribute. A repeated name replaces the earlier value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value.into();
        } else {
            self.attrs.push((name, value.into()));
        }
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text child. Markup in the text is kept verbatim.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_tag(&self.tag)
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute contains `token`.
    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|t| t == token))
    }

    /// Consume the element, yielding its children for the composer to walk.
    #[must_use]
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Consume the element, capturing its rendered subtree as content.
    ///
    /// Only the children are captured; the factory tag itself does not
    /// appear in the markup.
    #[must_use]
    pub fn capture_content(self) -> Content {
        let mut markup = String::new();
        for child in &self.children {
            markup.push_str(&child.render_markup());
        }
        Content { markup }
    }
}

/// Anything that can produce markup for the engine to display.
pub trait Renderable {
    fn render_markup(&self) -> String;
}

impl Renderable for Element {
    fn render_markup(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            out.push_str(&child.render_markup());
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

impl Renderable for Node {
    fn render_markup(&self) -> String {
        match self {
            Self::Element(el) => el.render_markup(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Captured subtree markup.
///
/// Produced by [`Element::capture_content`]; ownership transfers to
/// whichever marker consumes it. May be empty: a factory with no children
/// still announces itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    markup: String,
}

impl Content {
    #[must_use]
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self { markup: markup.into() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

impl Renderable for Content {
    fn render_markup(&self) -> String {
        self.markup.clone()
    }
}
