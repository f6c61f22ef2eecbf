//! Corpus archive extraction.
//!
//! The corpus is delivered as `.tar.gz` archives scattered under the data
//! root. Extraction is best-effort and idempotent: a failing archive is
//! logged and skipped, re-running over extracted data is harmless.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Archive file naming pattern
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Recursively discover every archive under `root`.
pub fn discover_archives(root: &Path) -> Vec<PathBuf> {
    let mut archives = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_string_lossy()
                        .ends_with(ARCHIVE_SUFFIX)
                {
                    archives.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                warn!("Error accessing entry: {}", e);
            }
        }
    }
    archives
}

/// Extract every archive under `root` into `root`.
///
/// Returns the number of archives extracted successfully.
pub fn expand_all(root: &Path) -> usize {
    let archives = discover_archives(root);
    info!("{} tar.gz files found", archives.len());

    let mut extracted = 0;
    for path in &archives {
        match expand(path, root) {
            Ok(()) => extracted += 1,
            Err(e) => warn!("Failed to extract {}: {}", path.display(), e),
        }
    }
    extracted
}

/// Extract one gzip-compressed tar archive into `dest`, creating it as needed.
pub fn expand(archive_path: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;

    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.unpack(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_archive(path: &Path, member: &str, content: &[u8]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_path(member).unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, content).unwrap();

        builder.into_inner().unwrap().finish().unwrap().flush().unwrap();
    }

    #[test]
    fn expand_all_extracts_into_the_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("batch1");
        std::fs::create_dir_all(&nested).unwrap();
        write_archive(&nested.join("part1.tar.gz"), "dialog/utt_001.txt", b"text");

        let extracted = expand_all(dir.path());

        assert_eq!(extracted, 1);
        let unpacked = dir.path().join("dialog").join("utt_001.txt");
        assert_eq!(std::fs::read(unpacked).unwrap(), b"text");
    }

    #[test]
    fn corrupt_archive_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.tar.gz"), b"not a gzip stream").unwrap();
        write_archive(&dir.path().join("good.tar.gz"), "ok.txt", b"ok");

        let extracted = expand_all(dir.path());

        assert_eq!(extracted, 1);
        assert!(dir.path().join("ok.txt").exists());
    }

    #[test]
    fn expand_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_archive(&dir.path().join("part.tar.gz"), "utt.txt", b"v1");

        assert_eq!(expand_all(dir.path()), 1);
        assert_eq!(expand_all(dir.path()), 1);
        assert_eq!(
            std::fs::read(dir.path().join("utt.txt")).unwrap(),
            b"v1"
        );
    }
}
