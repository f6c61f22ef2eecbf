//! Metadata list discovery and parallel record validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use kospeech_common::Result;

use crate::codes::AttributeFilter;
use crate::config::IngestConfig;
use crate::normalize::Normalize;
use crate::pool;
use crate::record::{self, Record};

/// Metadata list file naming pattern
pub const METADATA_SUFFIX: &str = "_metadata.txt";

/// Recursively discover every metadata list file under `root`.
///
/// Unreadable directory entries are skipped, not fatal; the scan continues.
pub fn discover_metadata_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_string_lossy()
                        .ends_with(METADATA_SUFFIX)
                {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                warn!("Error accessing entry: {}", e);
            }
        }
    }
    files
}

/// Validate every metadata line under the corpus root.
///
/// Each file's lines are partitioned into contiguous chunks and validated
/// concurrently; `make_normalizer` is invoked once per chunk so workers never
/// share a normalizer. Ordering of the returned records is unspecified.
pub fn scan<N, F>(
    config: &IngestConfig,
    filter: &AttributeFilter,
    make_normalizer: F,
) -> Result<Vec<Record>>
where
    N: Normalize + Send,
    F: Fn() -> N + Sync,
{
    let metadata_files = discover_metadata_files(&config.data_root);
    info!("{} metadata files found", metadata_files.len());

    let mut records = Vec::new();
    for file in &metadata_files {
        // an unreadable metadata file aborts the run
        let content = std::fs::read_to_string(file)?;
        let lines: Vec<&str> = content.lines().collect();

        let accepted = pool::chunked_try_map(
            &lines,
            config.parallelism,
            &make_normalizer,
            |normalizer, line| record::validate(line, config, filter, normalizer),
        )?;

        debug!(
            "{}: {} of {} lines accepted",
            file.display(),
            accepted.len(),
            lines.len()
        );
        records.extend(accepted);
    }

    info!("{} records imported", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discovers_only_metadata_lists() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("1.broadcast").join("dialog");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(nested.join("a_metadata.txt"), "").unwrap();
        std::fs::write(nested.join("b_metadata.txt"), "").unwrap();
        std::fs::write(nested.join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("c_metadata.txt"), "").unwrap();

        let mut found = discover_metadata_files(dir.path());
        found.sort();

        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with(METADATA_SUFFIX)));
    }

    #[test]
    fn discovery_of_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let found = discover_metadata_files(&dir.path().join("absent"));
        assert!(found.is_empty());
    }
}
