//! Manifest assembly from validated records.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use kospeech_common::jsonl;
use kospeech_common::manifest::{
    Recording, RecordingSet, Supervision, SupervisionCustom, SupervisionSet,
};
use kospeech_common::Result;

use crate::config::{IngestConfig, MANIFEST_PREFIX};
use crate::pool;
use crate::record::Record;

/// Language tag carried by every supervision
pub const LANGUAGE: &str = "Korean";

/// Build the index-aligned manifest pair from the full record set.
///
/// Records fan out across the worker pool; the merge into the two id-indexed
/// sets runs single-threaded and rejects duplicate identifiers.
pub fn build(records: &[Record], config: &IngestConfig) -> Result<(RecordingSet, SupervisionSet)> {
    let entries = pool::chunked_try_map(
        records,
        config.parallelism,
        || (),
        |_, record| Ok::<_, kospeech_common::Error>(Some(manifest_entries(record, config))),
    )?;

    let mut recordings = RecordingSet::new();
    let mut supervisions = SupervisionSet::new();
    for (recording, supervision) in entries {
        recordings.insert(recording)?;
        supervisions.insert(supervision)?;
    }

    debug!(
        "{} recordings, {} supervisions assembled",
        recordings.len(),
        supervisions.len()
    );
    Ok((recordings, supervisions))
}

/// Serialize both collections into the output directory.
pub fn write_manifests(
    recordings: &RecordingSet,
    supervisions: &SupervisionSet,
    config: &IngestConfig,
) -> Result<(PathBuf, PathBuf)> {
    let recordings_path = config
        .output_dir
        .join(format!("{MANIFEST_PREFIX}_recordings_all.jsonl.gz"));
    let supervisions_path = config
        .output_dir
        .join(format!("{MANIFEST_PREFIX}_supervisions_all.jsonl.gz"));

    jsonl::write_jsonl_gz(&recordings_path, recordings.iter())?;
    jsonl::write_jsonl_gz(&supervisions_path, supervisions.iter())?;

    Ok((recordings_path, supervisions_path))
}

fn manifest_entries(record: &Record, config: &IngestConfig) -> (Recording, Supervision) {
    let id = record.manifest_id(config.identity);
    let sample_rate =
        probe_sample_rate(&record.file_path).unwrap_or(config.default_sample_rate);

    let recording = Recording {
        id: id.clone(),
        source_path: record.file_path.to_string_lossy().into_owned(),
        duration: record.length,
        sample_rate,
    };
    let supervision = Supervision {
        id: id.clone(),
        recording_id: id,
        start: record.start,
        duration: record.end - record.start,
        text: record.text.clone(),
        language: LANGUAGE.to_string(),
        custom: SupervisionCustom {
            normalized_text: record.text.trim().to_string(),
        },
    };
    (recording, supervision)
}

/// Peek the RIFF/WAVE header for the sampling rate.
///
/// Only the canonical 28-byte header prefix is read, no sample data. Returns
/// `None` for non-WAV or truncated files.
fn probe_sample_rate(path: &Path) -> Option<u32> {
    let mut file = File::open(path).ok()?;
    let mut header = [0u8; 28];
    file.read_exact(&mut header).ok()?;

    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" || &header[12..16] != b"fmt " {
        return None;
    }
    Some(u32::from_le_bytes([
        header[24], header[25], header[26], header[27],
    ]))
}
