//! Invocation of the external pigment-retrieval model.
//!
//! The model is an opaque collaborator: given the corrected reflectance grid,
//! the fractional cover raster, and a scratch directory, it writes one named
//! raster into the scratch directory. Its stdout/stderr are appended to the
//! run log, and a non-zero exit status aborts the pipeline.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::{Error, Result};
use crate::types::Pigment;

#[derive(Clone, Debug)]
pub struct RetrievalModel {
    pub pigment: Pigment,
    pub program: PathBuf,
}

impl RetrievalModel {
    pub fn new(pigment: Pigment, program: PathBuf) -> Self {
        RetrievalModel { pigment, program }
    }

    /// Run the model to completion, appending its captured output to the run
    /// log. On success the work product is at
    /// `<work>/<corfl_basename>_<suffix>`.
    pub fn run(
        &self,
        reflectance: &Path,
        fractional_cover: &Path,
        work_dir: &Path,
        log_path: &Path,
    ) -> Result<()> {
        info!(
            model = %self.program.display(),
            pigment = %self.pigment,
            "running retrieval model"
        );
        let output = Command::new(&self.program)
            .arg(reflectance)
            .arg(fractional_cover)
            .arg(work_dir)
            .output()
            .map_err(|e| {
                Error::Config(format!(
                    "cannot launch retrieval model {}: {e}",
                    self.program.display()
                ))
            })?;

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        log.write_all(&output.stdout)?;
        log.write_all(&output.stderr)?;

        if !output.status.success() {
            return Err(Error::ExternalProcess {
                program: self.program.display().to_string(),
                status: output.status.to_string(),
            });
        }
        Ok(())
    }
}
