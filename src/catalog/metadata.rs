//! Metadata propagation: merges the inherited scene metadata with
//! product-specific overrides into the property bag of one catalog item.
//! Pure transformation; unknown inherited keys pass through untouched.
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::catalog::stac::Geometry;
use crate::config::SceneMetadata;
use crate::error::{Error, Result};

/// Timestamp format used by the upstream stage and in item properties.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Inherited map with overrides applied key-by-key; overrides win on
/// collision.
pub fn propagate(
    inherited: &Map<String, Value>,
    overrides: impl IntoIterator<Item = (String, Value)>,
) -> Map<String, Value> {
    let mut merged = inherited.clone();
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    merged
}

/// Spatial/temporal extent and property bag for one catalog item, derived
/// from the inherited scene metadata.
#[derive(Clone, Debug)]
pub struct ItemMetadata {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

/// Build the metadata document for one item.
///
/// The scene's descriptive fields (sensor plus any pass-through extras) form
/// the inherited map; description, product code, and processing level are the
/// product-specific overrides. Start/end times and the bounding box are
/// lifted into the item's typed extent rather than the property bag.
pub fn item_metadata(
    id: &str,
    description: &str,
    product_code: &str,
    scene: &SceneMetadata,
) -> Result<ItemMetadata> {
    let start = parse_time(&scene.start_time)?;
    let end = parse_time(&scene.end_time)?;

    let mut inherited = scene.extra.clone();
    inherited.insert("sensor".to_string(), Value::String(scene.sensor.clone()));

    let properties = propagate(
        &inherited,
        [
            (
                "description".to_string(),
                Value::String(description.to_string()),
            ),
            (
                "product".to_string(),
                Value::String(product_code.to_string()),
            ),
            (
                "processing_level".to_string(),
                Value::String(processing_level(id)),
            ),
        ],
    );

    Ok(ItemMetadata {
        id: id.to_string(),
        start,
        end,
        geometry: Geometry::polygon(&scene.bounding_box),
        properties,
    })
}

/// Processing level token of an output identifier, e.g. `L2B` in
/// `SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001`.
pub fn processing_level(id: &str) -> String {
    id.split('_').nth(2).unwrap_or_default().to_string()
}

pub fn format_time(t: &DateTime<Utc>) -> String {
    t.format(TIME_FORMAT).to_string()
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(|n| n.and_utc())
        .map_err(|e| Error::Config(format!("malformed scene timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneMetadata {
        serde_json::from_value(serde_json::json!({
            "sensor": "AVNG",
            "start_time": "2020-01-01T00:00:00Z",
            "end_time": "2020-01-01T00:11:00Z",
            "bounding_box": [[-122.1, 37.2], [-122.1, 37.9], [-121.5, 37.9], [-121.5, 37.2]],
            "day_night": "Day"
        }))
        .unwrap()
    }

    #[test]
    fn overrides_win_on_key_collision() {
        let mut inherited = Map::new();
        inherited.insert("sensor".to_string(), Value::String("AVNG".into()));
        inherited.insert("kept".to_string(), Value::String("as-is".into()));
        let merged = propagate(
            &inherited,
            [("sensor".to_string(), Value::String("EMIT".into()))],
        );
        assert_eq!(merged["sensor"], "EMIT");
        assert_eq!(merged["kept"], "as-is");
    }

    #[test]
    fn item_metadata_merges_scene_and_product_fields() {
        let meta = item_metadata(
            "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001_CHL",
            "Chlorophyll A content mg m-3",
            "AQUAPIG_CHL",
            &scene(),
        )
        .unwrap();
        assert_eq!(meta.properties["sensor"], "AVNG");
        assert_eq!(meta.properties["product"], "AQUAPIG_CHL");
        assert_eq!(meta.properties["processing_level"], "L2B");
        // pass-through of unknown inherited keys
        assert_eq!(meta.properties["day_night"], "Day");
        assert_eq!(format_time(&meta.start), "2020-01-01T00:00:00Z");
        assert_eq!(format_time(&meta.end), "2020-01-01T00:11:00Z");
        assert_eq!(meta.geometry.coordinates[0].len(), 5);
    }

    #[test]
    fn processing_level_survives_the_experimental_prefix() {
        assert_eq!(
            processing_level("EXPERIMENTAL-SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001"),
            "L2B"
        );
    }

    #[test]
    fn malformed_timestamp_is_a_config_error() {
        let mut s = scene();
        s.start_time = "01/01/2020".to_string();
        match item_metadata("ID_X_L2B", "d", "none", &s) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
