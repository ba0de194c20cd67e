//! Run configuration document and working-directory layout.
//!
//! The runconfig JSON is produced by the upstream stage; `inputs` names the
//! source datasets and processing revision, `metadata` carries the inherited
//! scene metadata that flows into every catalog item. Unknown metadata keys
//! are preserved and passed through to the output documents.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub inputs: RunInputs,
    pub metadata: SceneMetadata,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RunInputs {
    pub corrected_reflectance_dataset: PathBuf,
    pub fractional_cover_dataset: PathBuf,
    pub crid: String,
    pub experimental: bool,
}

/// Inherited scene metadata. The typed fields are the ones the pipeline
/// interprets; everything else rides along in `extra` untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub sensor: String,
    pub start_time: String,
    pub end_time: String,
    /// Corner coordinates as [lon, lat] pairs, not yet closed into a ring.
    pub bounding_box: Vec<[f64; 2]>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read runconfig {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("malformed runconfig {}: {e}", path.display())))
    }

    /// Basename of the corrected reflectance dataset, i.e. the source scene id.
    pub fn corfl_basename(&self) -> Result<String> {
        basename_of(&self.inputs.corrected_reflectance_dataset)
    }

    pub fn frcov_basename(&self) -> Result<String> {
        basename_of(&self.inputs.fractional_cover_dataset)
    }
}

fn basename_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Config(format!("dataset path has no basename: {}", path.display())))
}

/// Explicit working-directory layout threaded through every component.
/// Nothing in the pipeline consults the process's current directory.
#[derive(Clone, Debug)]
pub struct Dirs {
    pub input: PathBuf,
    pub work: PathBuf,
    pub output: PathBuf,
}

impl Dirs {
    pub fn new(input: PathBuf, work: PathBuf, output: PathBuf) -> Self {
        Dirs {
            input,
            work,
            output,
        }
    }

    /// Create the work and output directories if absent. The input directory
    /// is provisioned by the upstream stage and only read from.
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.work)?;
        fs::create_dir_all(&self.output)?;
        Ok(())
    }

    /// Corrected reflectance ENVI grid: `<input>/<base>/<base>.bin`.
    pub fn reflectance_path(&self, corfl_basename: &str) -> PathBuf {
        self.input
            .join(corfl_basename)
            .join(format!("{corfl_basename}.bin"))
    }

    /// Fractional cover raster: `<input>/<base>/<base>.tif`.
    pub fn fractional_cover_path(&self, frcov_basename: &str) -> PathBuf {
        self.input
            .join(frcov_basename)
            .join(format!("{frcov_basename}.tif"))
    }

    pub fn log_path(&self, base_id: &str) -> PathBuf {
        self.output.join(format!("{base_id}.log"))
    }

    pub fn runconfig_path(&self, base_id: &str) -> PathBuf {
        self.output.join(format!("{base_id}.runconfig.json"))
    }
}
