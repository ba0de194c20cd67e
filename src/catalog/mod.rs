//! Catalog assembly: one execution-record item plus one item per archival
//! raster, materialized as a self-contained directory tree.
//!
//! Materialization is a two-phase protocol. Descriptors are written first,
//! with asset hrefs that reference files still sitting flat in the output
//! directory; only once every descriptor is on disk are the asset files moved
//! into the per-item subdirectories those hrefs resolve against. The per-item
//! directory names are only known once item ids are finalized, so the
//! descriptors must exist before the tree they describe does.
pub mod metadata;
pub mod stac;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::config::SceneMetadata;
use crate::error::{Error, Result};
use crate::types::Pigment;

use metadata::{ItemMetadata, format_time, item_metadata};
use stac::{Catalog, Item};

/// Product-code stem shared by every data product of this pipeline.
pub const PRODUCT_CODE: &str = "AQUAPIG";

const CATALOG_DESCRIPTION: &str = "This catalog contains the output data products of the \
     aquatic pigments pipeline, including chlorophyll A and phycocyanin in cloud-optimized \
     GeoTIFF format. Execution artifacts including the runconfig file and execution log file \
     are also included.";

const EXECUTION_DESCRIPTION: &str = "Aquatic pigments - chlorophyll A content mg m-3, and \
     phycocyanin content (mg m-3) estimated using mixture density network.";

/// One expected data product, with its final (post-labeling) basename.
#[derive(Clone, Debug)]
pub struct ProductEntry {
    pub basename: String,
    pub pigment: Pigment,
}

pub struct CatalogAssembler<'a> {
    pub output_dir: &'a Path,
    pub scene: &'a SceneMetadata,
    /// Catalog root id: the source scene identifier.
    pub catalog_id: &'a str,
    /// Execution item id: the labeled run base identifier.
    pub exec_id: &'a str,
    pub disclaimer: &'a str,
}

impl CatalogAssembler<'_> {
    /// Build the in-memory catalog and materialize it under
    /// `<output>/<exec-id>/`. Returns the catalog root directory.
    pub fn assemble(&self, products: &[ProductEntry]) -> Result<PathBuf> {
        let mut items = Vec::new();
        items.push(self.execution_item()?);

        for (filename, entry) in self.discover_archives(products)? {
            items.push(self.data_item(&filename, &entry)?);
        }

        let mut catalog = Catalog::new(
            self.catalog_id,
            format!("{}{CATALOG_DESCRIPTION}", self.disclaimer),
        );
        for item in &items {
            catalog.add_item_link(&item.id);
        }

        info!(
            items = items.len(),
            root = %self.output_dir.join(self.exec_id).display(),
            "materializing catalog"
        );
        self.materialize(&catalog, &items)
    }

    /// Execution-record item: run log and resolved runconfig.
    fn execution_item(&self) -> Result<Item> {
        let description = format!("{}{EXECUTION_DESCRIPTION}", self.disclaimer);
        let meta = item_metadata(self.exec_id, &description, "none", self.scene)?;
        let mut item = build_item(meta);
        item.add_asset("runconfig", &format!("{}.runconfig.json", self.exec_id));
        item.add_asset("log", &format!("{}.log", self.exec_id));
        Ok(item)
    }

    /// Archival rasters present in the flat output directory, restricted to
    /// this run's products and sorted lexicographically by filename so the
    /// catalog ordering is reproducible.
    fn discover_archives(
        &self,
        products: &[ProductEntry],
    ) -> Result<Vec<(String, ProductEntry)>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(self.output_dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            let Some(stem) = name.strip_suffix(".tif") else {
                continue;
            };
            if let Some(product) = products.iter().find(|p| p.basename == stem) {
                found.push((name, product.clone()));
            }
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }

    fn data_item(&self, filename: &str, entry: &ProductEntry) -> Result<Item> {
        let description = format!("{}{}", self.disclaimer, entry.pigment.description());
        let product_code = format!("{PRODUCT_CODE}_{}", entry.pigment.suffix());
        let meta = item_metadata(&entry.basename, &description, &product_code, self.scene)?;
        let mut item = build_item(meta);
        item.add_asset("cog", filename);

        let browse = format!("{}.png", entry.basename);
        if self.output_dir.join(&browse).exists() {
            item.add_asset("browse", &browse);
        }
        Ok(item)
    }

    fn materialize(&self, catalog: &Catalog, items: &[Item]) -> Result<PathBuf> {
        let root = self.output_dir.join(self.exec_id);

        // Phase one: the full descriptor tree, hrefs pointing at the final
        // layout while the assets still sit flat in the output directory.
        fs::create_dir_all(&root)?;
        write_json(&root.join("catalog.json"), catalog)?;
        for item in items {
            let item_dir = root.join(&item.id);
            fs::create_dir_all(&item_dir)?;
            write_json(&item_dir.join(format!("{}.json", item.id)), item)?;
        }

        // Phase two: move every referenced asset into its item directory.
        for item in items {
            for asset in item.assets.values() {
                let filename = asset.filename();
                let src = self.output_dir.join(filename);
                if !src.exists() {
                    return Err(Error::MissingAsset { path: src });
                }
                fs::rename(&src, root.join(&item.id).join(filename))?;
            }
        }

        Ok(root)
    }
}

fn build_item(meta: ItemMetadata) -> Item {
    let mut properties = meta.properties;
    properties.insert("datetime".to_string(), format_time(&meta.start).into());
    properties.insert(
        "start_datetime".to_string(),
        format_time(&meta.start).into(),
    );
    properties.insert("end_datetime".to_string(), format_time(&meta.end).into());
    Item::new(meta.id, meta.geometry, properties)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXEC: &str = "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001";
    const CATALOG_ID: &str = "SISTER_AVNG_L2A_CORFL_20200101T000000_000";

    fn scene() -> SceneMetadata {
        serde_json::from_value(serde_json::json!({
            "sensor": "AVNG",
            "start_time": "2020-01-01T00:00:00Z",
            "end_time": "2020-01-01T00:11:00Z",
            "bounding_box": [[-122.1, 37.2], [-122.1, 37.9], [-121.5, 37.9], [-121.5, 37.2]]
        }))
        .unwrap()
    }

    fn products() -> Vec<ProductEntry> {
        vec![
            ProductEntry {
                basename: format!("{EXEC}_CHL"),
                pigment: Pigment::Chlorophyll,
            },
            ProductEntry {
                basename: format!("{EXEC}_PHYCO"),
                pigment: Pigment::Phycocyanin,
            },
        ]
    }

    fn seed_outputs(dir: &Path, with_phyco_browse: bool) {
        for name in [
            format!("{EXEC}.log"),
            format!("{EXEC}.runconfig.json"),
            format!("{EXEC}_CHL.tif"),
            format!("{EXEC}_CHL.png"),
            format!("{EXEC}_PHYCO.tif"),
        ] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        if with_phyco_browse {
            fs::write(dir.join(format!("{EXEC}_PHYCO.png")), b"x").unwrap();
        }
    }

    #[test]
    fn catalog_is_complete_and_self_contained() {
        let dir = tempfile::tempdir().unwrap();
        seed_outputs(dir.path(), true);

        let assembler = CatalogAssembler {
            output_dir: dir.path(),
            scene: &scene(),
            catalog_id: CATALOG_ID,
            exec_id: EXEC,
            disclaimer: "",
        };
        let root = assembler.assemble(&products()).unwrap();
        assert_eq!(root, dir.path().join(EXEC));

        let catalog: Catalog =
            serde_json::from_str(&fs::read_to_string(root.join("catalog.json")).unwrap()).unwrap();
        assert_eq!(catalog.id, CATALOG_ID);
        // one root link + one execution item + two data items
        assert_eq!(catalog.links.len(), 4);

        // every asset referenced by every item resolves inside the tree
        for link in catalog.links.iter().filter(|l| l.rel == "item") {
            let item_path = root.join(link.href.trim_start_matches("./"));
            let item: Item =
                serde_json::from_str(&fs::read_to_string(&item_path).unwrap()).unwrap();
            let item_dir = item_path.parent().unwrap();
            for asset in item.assets.values() {
                assert!(item_dir.join(asset.filename()).exists());
            }
        }

        // nothing from the run remains flat in the output directory
        let stray = fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().is_file())
            .count();
        assert_eq!(stray, 0);
    }

    #[test]
    fn browse_asset_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        seed_outputs(dir.path(), false);

        let assembler = CatalogAssembler {
            output_dir: dir.path(),
            scene: &scene(),
            catalog_id: CATALOG_ID,
            exec_id: EXEC,
            disclaimer: "",
        };
        let root = assembler.assemble(&products()).unwrap();

        let phyco: Item = serde_json::from_str(
            &fs::read_to_string(
                root.join(format!("{EXEC}_PHYCO"))
                    .join(format!("{EXEC}_PHYCO.json")),
            )
            .unwrap(),
        )
        .unwrap();
        assert!(phyco.assets.contains_key("cog"));
        assert!(!phyco.assets.contains_key("browse"));
        assert_eq!(phyco.properties["product"], "AQUAPIG_PHYCO");
        assert_eq!(phyco.properties["processing_level"], "L2B");
    }

    #[test]
    fn missing_execution_asset_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        seed_outputs(dir.path(), true);
        fs::remove_file(dir.path().join(format!("{EXEC}.log"))).unwrap();

        let assembler = CatalogAssembler {
            output_dir: dir.path(),
            scene: &scene(),
            catalog_id: CATALOG_ID,
            exec_id: EXEC,
            disclaimer: "",
        };
        match assembler.assemble(&products()) {
            Err(Error::MissingAsset { path }) => {
                assert!(path.ends_with(format!("{EXEC}.log")));
            }
            other => panic!("expected MissingAsset, got {other:?}"),
        }
    }

    #[test]
    fn disclaimer_prefixes_every_description() {
        let dir = tempfile::tempdir().unwrap();
        let exec_labeled = format!("EXPERIMENTAL-{EXEC}");
        for name in [
            format!("{exec_labeled}.log"),
            format!("{exec_labeled}.runconfig.json"),
            format!("EXPERIMENTAL-{EXEC}_CHL.tif"),
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let disclaimer = crate::core::labeler::DISCLAIMER;
        let assembler = CatalogAssembler {
            output_dir: dir.path(),
            scene: &scene(),
            catalog_id: CATALOG_ID,
            exec_id: &exec_labeled,
            disclaimer,
        };
        let products = vec![ProductEntry {
            basename: format!("EXPERIMENTAL-{EXEC}_CHL"),
            pigment: Pigment::Chlorophyll,
        }];
        let root = assembler.assemble(&products).unwrap();

        let catalog: Catalog =
            serde_json::from_str(&fs::read_to_string(root.join("catalog.json")).unwrap()).unwrap();
        assert!(catalog.description.starts_with(disclaimer));

        let chl_id = format!("EXPERIMENTAL-{EXEC}_CHL");
        let chl: Item = serde_json::from_str(
            &fs::read_to_string(root.join(&chl_id).join(format!("{chl_id}.json"))).unwrap(),
        )
        .unwrap();
        assert!(
            chl.properties["description"]
                .as_str()
                .unwrap()
                .starts_with(disclaimer)
        );
    }
}
