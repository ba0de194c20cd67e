//! Minimal STAC-shaped document models serialized with serde.
//!
//! Only the subset of the catalog/item schema this pipeline emits: a catalog
//! with item links, and GeoJSON-Feature items with a property bag and named
//! assets. Hrefs are always relative so a materialized tree is relocatable.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const STAC_VERSION: &str = "1.0.0";
pub const MEDIA_TYPE_JSON: &str = "application/json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "type")]
    pub catalog_type: String,
    pub id: String,
    pub stac_version: String,
    pub description: String,
    pub links: Vec<Link>,
}

impl Catalog {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Catalog {
            catalog_type: "Catalog".to_string(),
            id: id.into(),
            stac_version: STAC_VERSION.to_string(),
            description: description.into(),
            links: vec![Link::new("root", "./catalog.json")],
        }
    }

    pub fn add_item_link(&mut self, item_id: &str) {
        self.links
            .push(Link::new("item", format!("./{item_id}/{item_id}.json")));
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Link {
            rel: rel.into(),
            href: href.into(),
            media_type: MEDIA_TYPE_JSON.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub item_type: String,
    pub stac_version: String,
    pub id: String,
    pub geometry: Geometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub links: Vec<Link>,
    /// Asset-role name -> file reference, deterministically ordered.
    pub assets: BTreeMap<String, Asset>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        geometry: Geometry,
        properties: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Item {
            item_type: "Feature".to_string(),
            stac_version: STAC_VERSION.to_string(),
            id: id.into(),
            geometry,
            bbox: None,
            properties,
            links: vec![
                Link::new("root", "../catalog.json"),
                Link::new("parent", "../catalog.json"),
            ],
            assets: BTreeMap::new(),
        }
    }

    /// Register an asset by role, referencing a file that will live next to
    /// the item descriptor once the catalog is materialized.
    pub fn add_asset(&mut self, role: impl Into<String>, filename: &str) {
        self.assets.insert(
            role.into(),
            Asset {
                href: format!("./{filename}"),
            },
        );
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    pub href: String,
}

impl Asset {
    /// Filename portion of the relative href.
    pub fn filename(&self) -> &str {
        self.href.rsplit('/').next().unwrap_or(&self.href)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Geometry {
    /// Close the corner ring (first vertex re-appended) and wrap it as a
    /// GeoJSON Polygon.
    pub fn polygon(corners: &[[f64; 2]]) -> Self {
        let mut ring = corners.to_vec();
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        Geometry {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }
}
