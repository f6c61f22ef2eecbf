//! Line-delimited gzip JSON serialization.
//!
//! Manifest files are written as one JSON object per line inside a gzip
//! stream, the format the downstream training pipeline consumes.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Write `items` to `path` as gzip-compressed JSON lines.
///
/// Parent directories are created as needed. An empty iterator produces a
/// valid empty gzip stream.
pub fn write_jsonl_gz<'a, T, I>(path: &Path, items: I) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
    for item in items {
        let line = serde_json::to_string(item)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.finish()?.flush()?;
    Ok(())
}

/// Read back every record of a gzip-compressed JSON lines file.
pub fn read_jsonl_gz<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let reader = BufReader::new(GzDecoder::new(file));

    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        items.push(serde_json::from_str(&line)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Recording;
    use tempfile::TempDir;

    #[test]
    fn roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifests").join("recordings.jsonl.gz");

        let items = vec![
            Recording {
                id: "utt_001".to_string(),
                source_path: "/corpus/utt_001.wav".to_string(),
                duration: 2.25,
                sample_rate: 16_000,
            },
            Recording {
                id: "utt_002".to_string(),
                source_path: "/corpus/utt_002.wav".to_string(),
                duration: 1.5,
                sample_rate: 16_000,
            },
        ];

        write_jsonl_gz(&path, &items).unwrap();
        let loaded: Vec<Recording> = read_jsonl_gz(&path).unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn empty_set_writes_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.jsonl.gz");

        write_jsonl_gz::<Recording, _>(&path, &[]).unwrap();

        assert!(path.exists());
        let loaded: Vec<Recording> = read_jsonl_gz(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
