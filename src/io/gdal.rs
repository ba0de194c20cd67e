use gdal::Dataset;
use ndarray::Array2;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Georeferencing and shape of a single-band raster.
#[derive(Debug, Clone)]
pub struct RasterInfo {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format
    pub projection: String,
    /// Nodata sentinel of band 1, if declared
    pub nodata: Option<f64>,
}

/// Reader for generic single-band geospatial formats via GDAL (ENVI, GeoTIFF).
pub struct GdalRasterReader {
    pub dataset: Dataset,
    pub path: PathBuf,
    pub info: RasterInfo,
}

impl GdalRasterReader {
    /// Open a GDAL-supported dataset and capture its georeferencing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = Dataset::open(&path).map_err(|e| Error::RasterRead {
            path: path.clone(),
            source: e,
        })?;
        let (size_x, size_y) = dataset.raster_size();
        let geotransform = match dataset.geo_transform() {
            Ok(gt) => gt,
            Err(_) => [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        };
        let projection = dataset.projection();
        let nodata = dataset
            .rasterband(1)
            .map_err(|e| Error::RasterRead {
                path: path.clone(),
                source: e,
            })?
            .no_data_value();
        Ok(GdalRasterReader {
            dataset,
            path,
            info: RasterInfo {
                size_x,
                size_y,
                geotransform,
                projection,
                nodata,
            },
        })
    }

    /// Read band 1 as an f32 ndarray of shape (height, width).
    pub fn read_band_f32(&self) -> Result<Array2<f32>> {
        let band = self.dataset.rasterband(1).map_err(|e| Error::RasterRead {
            path: self.path.clone(),
            source: e,
        })?;
        let window = (self.info.size_x, self.info.size_y);
        let buf = band
            .read_as::<f32>((0, 0), window, window, None)
            .map_err(|e| Error::RasterRead {
                path: self.path.clone(),
                source: e,
            })?;
        let data_vec = buf.data().to_vec();
        Array2::from_shape_vec((self.info.size_y, self.info.size_x), data_vec).map_err(|_| {
            Error::RasterRead {
                path: self.path.clone(),
                source: gdal::errors::GdalError::BadArgument(format!(
                    "band shape does not match {}x{}",
                    self.info.size_x, self.info.size_y
                )),
            }
        })
    }
}
