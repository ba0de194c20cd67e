//! Raster-to-archival conversion.
//!
//! Copies a retrieval-model work product into a Float32 GTiff with the
//! product's band semantics embedded, builds a reduced-resolution overview
//! pyramid, and re-encodes it as an LZW-compressed, internally tiled COG in
//! the output directory. The intermediate lives in the work directory; the
//! COG is the long-lived artifact.
use std::path::{Path, PathBuf};

use gdal::raster::{Buffer, RasterCreationOption};
use gdal::{DriverManager, Metadata};
use tracing::info;

use crate::error::{Error, Result};
use crate::io::gdal::GdalRasterReader;
use crate::types::RasterProduct;

/// Overviews stop once the coarsest level's shorter side would fall below
/// this many pixels.
pub const OVERVIEW_MIN_SIZE: usize = 900;

/// Decimation factors for the overview pyramid: 2, 4, 8, ... while the
/// shorter raster side stays at or above `OVERVIEW_MIN_SIZE`.
pub fn overview_levels(size_x: usize, size_y: usize) -> Vec<i32> {
    let min_side = size_x.min(size_y);
    let mut levels = Vec::new();
    let mut factor = 2usize;
    while min_side / factor >= OVERVIEW_MIN_SIZE {
        levels.push(factor as i32);
        factor *= 2;
    }
    levels
}

/// Convert one pigment work product to `<output>/<basename>.tif`.
///
/// Pixel data, georeferencing, and the nodata sentinel are copied from the
/// source; the dataset-level description is the (possibly disclaimer-
/// prefixed) product description, and band 1 carries the semantic band name
/// plus `UNITS` and `DESCRIPTION` metadata items.
pub fn convert_to_cog(
    product: &RasterProduct,
    work_dir: &Path,
    output_dir: &Path,
    disclaimer: &str,
) -> Result<PathBuf> {
    let reader = GdalRasterReader::open(&product.path)?;
    let data = reader.read_band_f32()?;
    let (size_x, size_y) = (reader.info.size_x, reader.info.size_y);
    let pigment = product.pigment();
    let basename = product.identity.basename();

    let tmp_path = work_dir.join(format!("{basename}_tmp.tif"));
    let cog_path = output_dir.join(format!("{basename}.tif"));

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut ds = driver
        .create_with_band_type::<f32, _>(&tmp_path, size_x, size_y, 1)
        .map_err(|e| Error::RasterWrite {
            path: tmp_path.clone(),
            source: e,
        })?;

    ds.set_geo_transform(&reader.info.geotransform)?;
    if !reader.info.projection.is_empty() {
        ds.set_projection(&reader.info.projection)?;
    }
    ds.set_metadata_item(
        "DESCRIPTION",
        &format!("{disclaimer}{}", pigment.description()),
        "",
    )?;

    let mut band = ds.rasterband(1)?;
    band.set_description(pigment.band_name())?;
    if let Some(nodata) = reader.info.nodata {
        band.set_no_data_value(Some(nodata))?;
    }
    band.set_metadata_item("UNITS", pigment.units(), "")?;
    band.set_metadata_item("DESCRIPTION", pigment.description(), "")?;

    let mut buf = Buffer::new((size_x, size_y), data.into_raw_vec());
    band.write((0, 0), (size_x, size_y), &mut buf)
        .map_err(|e| Error::RasterWrite {
            path: tmp_path.clone(),
            source: e,
        })?;
    drop(band);

    let levels = overview_levels(size_x, size_y);
    if !levels.is_empty() {
        info!(levels = ?levels, "building overview pyramid");
        ds.build_overviews("NEAREST", &levels, &[])
            .map_err(|e| Error::RasterWrite {
                path: tmp_path.clone(),
                source: e,
            })?;
    }

    let options = [
        RasterCreationOption {
            key: "COMPRESS",
            value: "LZW",
        },
        RasterCreationOption {
            key: "TILED",
            value: "YES",
        },
        RasterCreationOption {
            key: "COPY_SRC_OVERVIEWS",
            value: "YES",
        },
    ];
    let cog = driver
        .create_copy(&cog_path, &ds, &options)
        .map_err(|e| Error::RasterWrite {
            path: cog_path.clone(),
            source: e,
        })?;
    // Close both writers before anything renames or reads the finalized file.
    drop(cog);
    drop(ds);

    info!(cog = %cog_path.display(), "archival raster written");
    Ok(cog_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_pyramid_respects_min_size() {
        // 7200x3600: 3600/2=1800, 3600/4=900 ok; 3600/8=450 too small.
        assert_eq!(overview_levels(7200, 3600), vec![2, 4]);
        // Just under a doubling boundary.
        assert_eq!(overview_levels(1799, 5000), vec![]);
        assert_eq!(overview_levels(1800, 5000), vec![2]);
        // Small rasters get no overviews at all.
        assert_eq!(overview_levels(600, 600), vec![]);
    }
}
