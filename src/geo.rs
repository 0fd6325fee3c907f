#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use crate::consts;

/// A geographic position in degrees.
///
/// Zero is a valid value on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A pixel offset anchoring an icon or popup to its geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Container dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Initial viewport configuration for a map host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(consts::DEFAULT_CENTER_LAT, consts::DEFAULT_CENTER_LNG),
            zoom: consts::DEFAULT_ZOOM,
            min_zoom: consts::MIN_ZOOM,
        }
    }
}
