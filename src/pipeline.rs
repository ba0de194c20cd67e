//! End-to-end pipeline orchestration: identifier derivation, retrieval-model
//! runs, archival conversion, quicklook rendering, experimental labeling, and
//! catalog assembly, strictly in that order.
//!
//! The pipeline is sequential and crash-to-caller: every stage runs to
//! completion before the next begins, and the first error aborts the run with
//! no rollback of files already written. Callers provide a clean output
//! directory per run.
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::catalog::{CatalogAssembler, ProductEntry};
use crate::config::{Dirs, RunConfig};
use crate::core::{ident, labeler, retrieval::RetrievalModel};
use crate::error::Result;
use crate::io::writers::{cog::convert_to_cog, quicklook::render_quicklook};
use crate::types::{Pigment, RasterProduct};

pub struct Pipeline {
    /// Path of the runconfig document this run was launched with; a copy
    /// becomes the execution item's `runconfig` asset.
    pub runconfig_path: PathBuf,
    pub config: RunConfig,
    pub dirs: Dirs,
    /// Chlorophyll-a retrieval model executable.
    pub chla_model: PathBuf,
    /// Phycocyanin retrieval model executable.
    pub phyco_model: PathBuf,
}

impl Pipeline {
    /// Run the whole pipeline; returns the materialized catalog root.
    pub fn run(&self) -> Result<PathBuf> {
        let experimental = self.config.inputs.experimental;
        let disclaimer = labeler::disclaimer(experimental);

        let corfl_basename = self.config.corfl_basename()?;
        let frcov_basename = self.config.frcov_basename()?;
        let base_id = ident::derive_base_id(&corfl_basename, &self.config.inputs.crid)?;
        let identities = ident::derive_identities(&corfl_basename, &self.config.inputs.crid)?;
        info!(base_id = %base_id, experimental, "starting aquatic pigments run");

        self.dirs.create()?;

        let reflectance = self.dirs.reflectance_path(&corfl_basename);
        let fractional_cover = self.dirs.fractional_cover_path(&frcov_basename);
        let log_path = self.dirs.log_path(&base_id);

        for model in self.models() {
            model.run(&reflectance, &fractional_cover, &self.dirs.work, &log_path)?;
        }

        for identity in &identities {
            let product = RasterProduct::new(&self.dirs.work, &corfl_basename, identity.clone());
            convert_to_cog(&product, &self.dirs.work, &self.dirs.output, disclaimer)?;
            render_quicklook(&product, &self.dirs.output)?;
        }

        info!("copying runconfig to output directory");
        fs::copy(&self.runconfig_path, self.dirs.runconfig_path(&base_id))?;

        // Label before any filename is captured into metadata or item ids;
        // everything below derives names from the labeled form.
        if experimental {
            let renamed = labeler::apply(&self.dirs.output, &base_id)?;
            info!(renamed, "experimental outputs labeled");
        }
        let exec_id = labeler::labeled(&base_id, experimental);
        let products: Vec<ProductEntry> = identities
            .iter()
            .map(|identity| ProductEntry {
                basename: labeler::labeled(&identity.basename(), experimental),
                pigment: identity.pigment,
            })
            .collect();

        let assembler = CatalogAssembler {
            output_dir: &self.dirs.output,
            scene: &self.config.metadata,
            catalog_id: &corfl_basename,
            exec_id: &exec_id,
            disclaimer,
        };
        let root = assembler.assemble(&products)?;
        info!(catalog = %root.join("catalog.json").display(), "run complete");
        Ok(root)
    }

    fn models(&self) -> [RetrievalModel; 2] {
        [
            RetrievalModel::new(Pigment::Chlorophyll, self.chla_model.clone()),
            RetrievalModel::new(Pigment::Phycocyanin, self.phyco_model.clone()),
        ]
    }
}
