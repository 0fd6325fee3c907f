//! Shared configuration constants: resource URLs, the default view, and
//! default icon geometry.

/// Tile source for the base layer.
pub const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution markup for the base layer.
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>";

/// Engine stylesheet loaded into the host's render scope.
pub const MAP_STYLESHEET_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Clustering script. The host's cluster gate stays closed until this
/// reports loaded.
pub const CLUSTER_SCRIPT_URL: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js";

/// Default view: Montréal.
pub const DEFAULT_CENTER_LAT: f64 = 45.5088;
pub const DEFAULT_CENTER_LNG: f64 = -73.5617;
pub const DEFAULT_ZOOM: u8 = 11;
pub const MIN_ZOOM: u8 = 9;

/// Default icon image and geometry. The anchors are strings so they go
/// through the same parsing as author-supplied attribute values.
pub const DEFAULT_ICON_URL: &str = "/static/map/icon/marker-default.svg";
pub const DEFAULT_ICON_ANCHOR: &str = "20 10";
pub const DEFAULT_POPUP_ANCHOR: &str = "-5 -10";

/// Class token on an icon element that selects the hover-icon role.
pub const HOVER_ICON_CLASS: &str = "hover";
