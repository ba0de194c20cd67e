//! I/O layer for GDAL-backed rasters.
//! Provides the `gdal` reader adapter and `writers` for the archival COG and
//! PNG quicklook outputs.
pub mod gdal;
pub use gdal::{GdalRasterReader, RasterInfo};

pub mod writers;
