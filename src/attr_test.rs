#![allow(clippy::float_cmp)]

use super::*;
use crate::element::Element;

fn el(attrs: &[(&str, &str)]) -> Element {
    let mut el = Element::new("leaflet-icon");
    for (name, value) in attrs {
        el = el.with_attr(*name, *value);
    }
    el
}

// --- read_string ---

#[test]
fn read_string_present() {
    let el = el(&[("class", "hover big")]);
    assert_eq!(read_string(&el, "class", ""), "hover big");
}

#[test]
fn read_string_absent_uses_default() {
    let el = el(&[]);
    assert_eq!(read_string(&el, "class", "fallback"), "fallback");
}

// --- read_anchor ---

#[test]
fn read_anchor_well_formed_pair() {
    let el = el(&[("icon-anchor", "9 -10")]);
    assert_eq!(read_anchor(&el, "icon-anchor", "0 0"), Ok(Anchor::new(9, -10)));
}

#[test]
fn read_anchor_tolerates_extra_whitespace() {
    let el = el(&[("icon-anchor", "  4\t 7 ")]);
    assert_eq!(read_anchor(&el, "icon-anchor", "0 0"), Ok(Anchor::new(4, 7)));
}

#[test]
fn read_anchor_non_numeric_token() {
    let el = el(&[("icon-anchor", "abc 1")]);
    let err = read_anchor(&el, "icon-anchor", "0 0").unwrap_err();
    assert!(matches!(err, AttrError::MalformedAnchor { .. }));
}

#[test]
fn read_anchor_single_token() {
    let el = el(&[("icon-anchor", "1")]);
    let err = read_anchor(&el, "icon-anchor", "0 0").unwrap_err();
    assert!(matches!(err, AttrError::MalformedAnchor { .. }));
}

#[test]
fn read_anchor_empty_string() {
    let el = el(&[("icon-anchor", "")]);
    let err = read_anchor(&el, "icon-anchor", "0 0").unwrap_err();
    assert!(matches!(err, AttrError::MalformedAnchor { .. }));
}

#[test]
fn read_anchor_absent_parses_default() {
    let el = el(&[]);
    assert_eq!(read_anchor(&el, "icon-anchor", "20 10"), Ok(Anchor::new(20, 10)));
}

#[test]
fn read_anchor_malformed_default_is_error() {
    let el = el(&[]);
    let err = read_anchor(&el, "icon-anchor", "not an anchor").unwrap_err();
    assert!(matches!(err, AttrError::MalformedAnchor { .. }));
}

#[test]
fn read_anchor_error_names_attribute_and_value() {
    let el = el(&[("popup-anchor", "x y")]);
    let err = read_anchor(&el, "popup-anchor", "0 0").unwrap_err();
    assert_eq!(
        err,
        AttrError::MalformedAnchor { name: "popup-anchor".into(), value: "x y".into() }
    );
}

// --- read_coordinate ---

#[test]
fn read_coordinate_valid_pair_is_exact() {
    let el = el(&[("latitude", "45.50"), ("longitude", "-73.56")]);
    let pos = read_coordinate(&el, "latitude", "longitude").unwrap();
    assert_eq!(pos.lat, 45.50);
    assert_eq!(pos.lng, -73.56);
}

#[test]
fn read_coordinate_zero_is_valid() {
    let el = el(&[("latitude", "0"), ("longitude", "0")]);
    let pos = read_coordinate(&el, "latitude", "longitude").unwrap();
    assert_eq!(pos.lat, 0.0);
    assert_eq!(pos.lng, 0.0);
}

#[test]
fn read_coordinate_missing_latitude() {
    let el = el(&[("longitude", "-73.56")]);
    let err = read_coordinate(&el, "latitude", "longitude").unwrap_err();
    assert_eq!(err, AttrError::MissingCoordinate { name: "latitude".into() });
}

#[test]
fn read_coordinate_missing_longitude() {
    let el = el(&[("latitude", "45.50")]);
    let err = read_coordinate(&el, "latitude", "longitude").unwrap_err();
    assert_eq!(err, AttrError::MissingCoordinate { name: "longitude".into() });
}

#[test]
fn read_coordinate_non_numeric() {
    let el = el(&[("latitude", "north"), ("longitude", "-73.56")]);
    let err = read_coordinate(&el, "latitude", "longitude").unwrap_err();
    assert!(matches!(err, AttrError::MissingCoordinate { .. }));
}

#[test]
fn read_coordinate_nan_text_rejected() {
    let el = el(&[("latitude", "NaN"), ("longitude", "-73.56")]);
    let err = read_coordinate(&el, "latitude", "longitude").unwrap_err();
    assert!(matches!(err, AttrError::MissingCoordinate { .. }));
}

#[test]
fn read_coordinate_negative_values() {
    let el = el(&[("latitude", "-33.8688"), ("longitude", "151.2093")]);
    let pos = read_coordinate(&el, "latitude", "longitude").unwrap();
    assert_eq!(pos.lat, -33.8688);
    assert_eq!(pos.lng, 151.2093);
}

#[test]
fn attr_error_display() {
    let err = AttrError::MalformedAnchor { name: "icon-anchor".into(), value: "abc 1".into() };
    assert_eq!(
        err.to_string(),
        "attribute `icon-anchor`: expected two numbers, got `abc 1`"
    );
}
