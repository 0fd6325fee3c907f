//! GeoJSON collaborator types and feature-driven marker elements.
//!
//! Sibling glue fetches feature collections and renders popup cards; this
//! module gives that glue typed shapes and turns point features into
//! marker elements the composer can mount, one marker per feature.

#[cfg(test)]
#[path = "geojson_test.rs"]
mod geojson_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::Element;

/// A GeoJSON-shaped feature collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

/// One feature: geometry plus an open-ended properties bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Value,
}

/// Geometry; point coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl FeatureCollection {
    /// Wrap a plain API result list (`{"results": [...]}`, each entry
    /// carrying a `geom` field) into feature-collection shape. A value
    /// that already is a feature collection passes through unchanged.
    ///
    /// # Errors
    ///
    /// Deserialization errors for a malformed collection or result list.
    pub fn from_api_results(data: Value) -> Result<Self, serde_json::Error> {
        if data.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
            return serde_json::from_value(data);
        }
        let results = data
            .get("results")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let results: Vec<Value> = serde_json::from_value(results)?;
        let features = results
            .into_iter()
            .map(|entry| Feature {
                kind: "Feature".to_string(),
                id: entry.get("id").cloned(),
                geometry: entry
                    .get("geom")
                    .cloned()
                    .and_then(|geom| serde_json::from_value(geom).ok()),
                properties: entry,
            })
            .collect();
        Ok(Self { kind: "FeatureCollection".to_string(), features })
    }
}

impl Feature {
    /// Typed view over the properties bag.
    #[must_use]
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.properties)
    }

    /// Point position as `(latitude, longitude)`, if this feature carries
    /// point geometry. Note the axis flip from the wire order.
    #[must_use]
    pub fn point(&self) -> Option<(f64, f64)> {
        let geometry = self.geometry.as_ref()?;
        if geometry.kind != "Point" {
            return None;
        }
        match geometry.coordinates.as_slice() {
            [lng, lat, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }
}

/// Typed access to common fields of a feature's `properties` bag.
pub struct Props<'a> {
    value: &'a Value,
}

impl<'a> Props<'a> {
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Numeric feature id, when the properties carry one.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.value.get("id").and_then(Value::as_i64)
    }

    /// Display title. Empty string when absent.
    #[must_use]
    pub fn title(&self) -> &str {
        self.value.get("title").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Neighborhood label. Empty string when absent.
    #[must_use]
    pub fn neighborhood(&self) -> &str {
        self.value
            .get("neighborhood")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }
}

/// Build one marker element per point feature.
///
/// `render_popup` is the external template renderer; its markup becomes
/// the marker's popup content. Features without point geometry are
/// skipped.
pub fn marker_elements<F>(collection: &FeatureCollection, render_popup: F) -> Vec<Element>
where
    F: Fn(&Feature) -> String,
{
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let Some((lat, lng)) = feature.point() else {
                tracing::warn!(feature = ?feature.id, "feature has no point geometry, skipping");
                return None;
            };
            Some(
                Element::marker(lat, lng)
                    .with_child(Element::popup().with_text(render_popup(feature))),
            )
        })
        .collect()
}
