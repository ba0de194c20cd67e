//! Shared types used across the pipeline.
//! Includes the `Pigment` product descriptor, `ProductIdentity` naming triple,
//! and the `RasterProduct` handle passed to the converter and renderer.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Retrieved pigment products, one per external model run.
///
/// The descriptor carries every product-specific constant (filename suffix,
/// band semantics, units, description) so later stages never have to inspect
/// filenames to decide what a product is.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Pigment {
    Chlorophyll,
    Phycocyanin,
}

impl Pigment {
    pub const ALL: [Pigment; 2] = [Pigment::Chlorophyll, Pigment::Phycocyanin];

    /// Filename suffix appended to the base output identifier.
    pub fn suffix(&self) -> &'static str {
        match self {
            Pigment::Chlorophyll => "CHL",
            Pigment::Phycocyanin => "PHYCO",
        }
    }

    /// Semantic band name embedded in the archival raster.
    pub fn band_name(&self) -> &'static str {
        match self {
            Pigment::Chlorophyll => "chlorophyll_a",
            Pigment::Phycocyanin => "phycocyanin",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Pigment::Chlorophyll => "mg m-3",
            Pigment::Phycocyanin => "mg m-3",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Pigment::Chlorophyll => "Chlorophyll A content mg m-3",
            Pigment::Phycocyanin => {
                "Phycocyanin content (mg m-3) estimated using mixture density network."
            }
        }
    }

    /// Suffix of the raster the retrieval model writes into the work directory.
    pub fn work_suffix(&self) -> &'static str {
        match self {
            Pigment::Chlorophyll => "aqchla",
            Pigment::Phycocyanin => "phyco",
        }
    }

    /// Path of the retrieval model's work product for a given source scene.
    pub fn work_product_path(&self, work_dir: &Path, corfl_basename: &str) -> PathBuf {
        work_dir.join(format!("{}_{}", corfl_basename, self.work_suffix()))
    }
}

impl std::fmt::Display for Pigment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pigment::Chlorophyll => write!(f, "chlorophyll-a"),
            Pigment::Phycocyanin => write!(f, "phycocyanin"),
        }
    }
}

/// Derived naming triple for one output product: the base output identifier
/// (scene id with product type and CRID substituted) plus the pigment whose
/// suffix completes the product basename.
///
/// Identities are pure functions of (scene id, CRID); re-deriving with the
/// same inputs yields the same names.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProductIdentity {
    pub base: String,
    pub pigment: Pigment,
}

impl ProductIdentity {
    pub fn new(base: impl Into<String>, pigment: Pigment) -> Self {
        ProductIdentity {
            base: base.into(),
            pigment,
        }
    }

    /// Output basename, without extension: `<base>_<SUFFIX>`.
    pub fn basename(&self) -> String {
        format!("{}_{}", self.base, self.pigment.suffix())
    }
}

/// One physical single-band grid produced by the retrieval model, together
/// with the band semantics used when archiving it. Georeferencing and the
/// nodata sentinel live in the file itself and are read at conversion time.
#[derive(Clone, Debug)]
pub struct RasterProduct {
    /// Source grid in the work directory (disposable work product).
    pub path: PathBuf,
    pub identity: ProductIdentity,
}

impl RasterProduct {
    pub fn new(work_dir: &Path, corfl_basename: &str, identity: ProductIdentity) -> Self {
        RasterProduct {
            path: identity
                .pigment
                .work_product_path(work_dir, corfl_basename),
            identity,
        }
    }

    pub fn pigment(&self) -> Pigment {
        self.identity.pigment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basenames_follow_pigment_suffix() {
        let base = "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001";
        let chla = ProductIdentity::new(base, Pigment::Chlorophyll);
        let phyco = ProductIdentity::new(base, Pigment::Phycocyanin);
        assert_eq!(
            chla.basename(),
            "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001_CHL"
        );
        assert_eq!(
            phyco.basename(),
            "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001_PHYCO"
        );
    }

    #[test]
    fn work_product_path_uses_source_scene_name() {
        let p = Pigment::Chlorophyll
            .work_product_path(Path::new("work"), "SISTER_AVNG_L2A_CORFL_20200101T000000_000");
        assert_eq!(
            p,
            Path::new("work/SISTER_AVNG_L2A_CORFL_20200101T000000_000_aqchla")
        );
    }
}
