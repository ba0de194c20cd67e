//! Quicklook rendering: a colorized, perceptually stretched PNG preview of a
//! single-band pigment raster. Nodata renders as solid black and never
//! participates in the stretch statistics.
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tracing::info;

use crate::core::colormap::winter;
use crate::core::stretch::{log10_valid, mask_nodata, rescale_to_percentile_band};
use crate::error::Result;
use crate::io::gdal::GdalRasterReader;
use crate::types::RasterProduct;

/// Render `<output>/<basename>.png` from the same work product the converter
/// archives.
pub fn render_quicklook(product: &RasterProduct, output_dir: &Path) -> Result<PathBuf> {
    let reader = GdalRasterReader::open(&product.path)?;
    let mut data = reader.read_band_f32()?;

    if let Some(nodata) = reader.info.nodata {
        mask_nodata(&mut data, nodata);
    }
    log10_valid(&mut data, product.pigment().band_name())?;
    rescale_to_percentile_band(&mut data);

    let (rows, cols) = data.dim();
    let image = RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        Rgb(winter(data[[y as usize, x as usize]]))
    });

    let png_path = output_dir.join(format!("{}.png", product.identity.basename()));
    image.save(&png_path)?;
    info!(quicklook = %png_path.display(), "quicklook written");
    Ok(png_path)
}
