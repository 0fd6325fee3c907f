//! Typed attribute reads over elements.
//!
//! Attribute text is the only author-facing input surface, so all parsing
//! and validation concentrates here. String reads never fail; anchor and
//! coordinate reads return [`AttrError`], which is fatal for the element
//! being constructed.

#[cfg(test)]
#[path = "attr_test.rs"]
mod attr_test;

use crate::element::Element;
use crate::geo::{Anchor, LatLng};

/// Error returned by attribute reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttrError {
    /// The attribute value (or its default) is not a pair of numbers.
    #[error("attribute `{name}`: expected two numbers, got `{value}`")]
    MalformedAnchor { name: String, value: String },
    /// A required coordinate attribute is absent or not numeric.
    #[error("coordinate attribute `{name}` is missing or not a number")]
    MissingCoordinate { name: String },
}

/// Read a string attribute, falling back to `default` when absent.
#[must_use]
pub fn read_string(el: &Element, name: &str, default: &str) -> String {
    el.attr(name).unwrap_or(default).to_string()
}

/// Read an "`x y`" anchor pair.
///
/// The default is itself a string subject to the same parsing, so a
/// malformed default is also an error.
///
/// # Errors
///
/// [`AttrError::MalformedAnchor`] if either of the first two
/// whitespace-separated tokens fails to parse as an integer.
pub fn read_anchor(el: &Element, name: &str, default: &str) -> Result<Anchor, AttrError> {
    let raw = el.attr(name).unwrap_or(default);
    let malformed = || AttrError::MalformedAnchor {
        name: name.to_string(),
        value: raw.to_string(),
    };

    let mut parts = raw.split_whitespace();
    let x = parts
        .next()
        .and_then(|p| p.parse::<i32>().ok())
        .ok_or_else(malformed)?;
    let y = parts
        .next()
        .and_then(|p| p.parse::<i32>().ok())
        .ok_or_else(malformed)?;
    Ok(Anchor::new(x, y))
}

/// Read the required coordinate pair off a marker element.
///
/// Zero is a valid coordinate on both axes; only absence or non-numeric
/// text is rejected.
///
/// # Errors
///
/// [`AttrError::MissingCoordinate`] naming the first offending attribute.
/// The caller must treat this as fatal for the owning marker.
pub fn read_coordinate(el: &Element, lat_name: &str, lng_name: &str) -> Result<LatLng, AttrError> {
    let lat = read_float(el, lat_name)?;
    let lng = read_float(el, lng_name)?;
    Ok(LatLng::new(lat, lng))
}

fn read_float(el: &Element, name: &str) -> Result<f64, AttrError> {
    el.attr(name)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .ok_or_else(|| AttrError::MissingCoordinate { name: name.to_string() })
}
