//! Experimental labeling: when a run is flagged non-operational, every output
//! filename gains a fixed prefix and every human-readable description gains a
//! disclaimer. The filename pass must complete before any name is captured
//! into metadata documents or catalog item ids, or the catalog and the files
//! it references will disagree.
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;

pub const FILENAME_PREFIX: &str = "EXPERIMENTAL-";
pub const DISCLAIMER: &str =
    "(DISCLAIMER: THIS DATA IS EXPERIMENTAL AND NOT INTENDED FOR SCIENTIFIC USE) ";

/// Disclaimer prefix for descriptions: the disclaimer text when experimental,
/// empty otherwise.
pub fn disclaimer(experimental: bool) -> &'static str {
    if experimental { DISCLAIMER } else { "" }
}

/// Labeled form of a run identifier or filename.
pub fn labeled(name: &str, experimental: bool) -> String {
    if experimental {
        format!("{FILENAME_PREFIX}{name}")
    } else {
        name.to_string()
    }
}

/// Rename every file in `output_dir` belonging to this run's output set
/// (names starting with `base_id`) by prepending the experimental prefix.
///
/// Already-labeled files no longer start with `base_id`, so a second pass
/// over the same directory renames nothing. Entries are visited in sorted
/// order. Returns the number of files renamed.
pub fn apply(output_dir: &Path, base_id: &str) -> Result<usize> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(base_id) {
            names.push(name);
        }
    }
    names.sort();

    for name in &names {
        let from = output_dir.join(name);
        let to = output_dir.join(format!("{FILENAME_PREFIX}{name}"));
        info!(from = %from.display(), to = %to.display(), "labeling experimental output");
        fs::rename(&from, &to)?;
    }
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001";

    #[test]
    fn renames_only_this_runs_outputs() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            format!("{BASE}.log"),
            format!("{BASE}_CHL.tif"),
            format!("{BASE}_CHL.png"),
            "unrelated.txt".to_string(),
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let renamed = apply(dir.path(), BASE).unwrap();
        assert_eq!(renamed, 3);
        assert!(dir.path().join(format!("EXPERIMENTAL-{BASE}.log")).exists());
        assert!(
            dir.path()
                .join(format!("EXPERIMENTAL-{BASE}_CHL.tif"))
                .exists()
        );
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn second_pass_renames_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(format!("{BASE}_CHL.tif")), b"x").unwrap();

        assert_eq!(apply(dir.path(), BASE).unwrap(), 1);
        assert_eq!(apply(dir.path(), BASE).unwrap(), 0);
        assert!(
            dir.path()
                .join(format!("EXPERIMENTAL-{BASE}_CHL.tif"))
                .exists()
        );
    }

    #[test]
    fn labeled_names_and_disclaimer_track_the_flag() {
        assert_eq!(labeled(BASE, false), BASE);
        assert_eq!(labeled(BASE, true), format!("EXPERIMENTAL-{BASE}"));
        assert_eq!(disclaimer(false), "");
        assert!(disclaimer(true).starts_with("(DISCLAIMER"));
    }
}
