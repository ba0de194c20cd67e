#![doc = r#"
AQUAPIG — post-processing and cataloging for aquatic pigment retrievals.

This crate turns raw single-band pigment-concentration rasters (written by an
external retrieval model) into distributable science-data artifacts: LZW-
compressed, tiled, overview-pyramided GeoTIFFs; colorized PNG quicklooks;
per-product metadata; and a self-contained STAC-style catalog linking the
artifacts with their spatial and temporal context. It powers the `aquapig`
CLI and can be embedded in your own Rust applications.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: run the whole pipeline
-----------------------------------
```rust,no_run
use std::path::PathBuf;
use aquapig::{Dirs, Pipeline, RunConfig};

fn main() -> aquapig::Result<()> {
    let runconfig_path = PathBuf::from("runconfig.json");
    let config = RunConfig::from_file(&runconfig_path)?;

    let pipeline = Pipeline {
        runconfig_path,
        config,
        dirs: Dirs::new("input".into(), "work".into(), "output".into()),
        chla_model: "/models/chla/run_mdn".into(),
        phyco_model: "/models/phyco/run_mdn".into(),
    };

    let catalog_root = pipeline.run()?;
    println!("catalog at {}", catalog_root.display());
    Ok(())
}
```

Individual stages
-----------------
Each stage is usable on its own: derive identifiers with
[`derive_identities`], archive a raster with [`convert_to_cog`], render a
preview with [`render_quicklook`], and assemble a catalog with
[`CatalogAssembler`].

```rust
use aquapig::derive_base_id;

fn ids() -> aquapig::Result<()> {
    let base = derive_base_id("SISTER_AVNG_L2A_CORFL_20200101T000000_000", "001")?;
    assert_eq!(base, "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001");
    Ok(())
}
```

Error handling
--------------
All public functions return `aquapig::Result<T>`; match on `aquapig::Error`
to handle specific cases, e.g. a failed retrieval model run or a missing
catalog asset.

Useful modules
--------------
- [`pipeline`] — the end-to-end run.
- [`catalog`] — STAC models, metadata propagation, and catalog assembly.
- [`core`] — identifier derivation, stretch/colormap, labeling, retrieval.
- [`io`] — GDAL reader and the COG/quicklook writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod types;

// Curated public API surface
pub use config::{Dirs, RunConfig, SceneMetadata};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use types::{Pigment, ProductIdentity, RasterProduct};

pub use catalog::{CatalogAssembler, ProductEntry};
pub use core::ident::{derive_base_id, derive_identities};
pub use core::retrieval::RetrievalModel;
pub use io::gdal::GdalRasterReader;
pub use io::writers::cog::convert_to_cog;
pub use io::writers::quicklook::render_quicklook;
