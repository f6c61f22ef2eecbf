//! Per-line metadata record validation.
//!
//! A metadata line either produces a fully-populated [`Record`] or nothing:
//! missing siblings and filtered attributes silently drop the line, while a
//! malformed line or annotation aborts the run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use kospeech_common::{Error, Result};

use crate::codes::{AttributeFilter, Attributes};
use crate::config::{IdentityPolicy, IngestConfig};
use crate::normalize::Normalize;

/// Field delimiter of a metadata line
const FIELD_DELIMITER: &str = " | ";

/// Positional fields per metadata line
pub const FIELD_COUNT: usize = 9;

/// Sibling JSON annotation of one utterance
#[derive(Debug, Deserialize)]
struct Annotation {
    start: f64,
    end: f64,
    length: f64,
    #[serde(rename = "metadata")]
    id: String,
}

/// One validated corpus utterance
#[derive(Debug, Clone)]
pub struct Record {
    /// Absolute path of the audio file
    pub file_path: PathBuf,

    /// Speaker and recording attribute codes
    pub attributes: Attributes,

    /// Segment onset (seconds), from the annotation
    pub start: f64,

    /// Segment end timestamp (seconds), from the annotation
    pub end: f64,

    /// Recording length (seconds), from the annotation
    pub length: f64,

    /// Utterance identifier, from the annotation
    pub id: String,

    /// Normalized transcript
    pub text: String,
}

impl Record {
    /// Identifier this record contributes to the manifests
    pub fn manifest_id(&self, policy: IdentityPolicy) -> String {
        match policy {
            IdentityPolicy::Annotation => self.id.clone(),
            IdentityPolicy::FilePath => self.file_path.to_string_lossy().into_owned(),
        }
    }
}

/// Validate one raw metadata line.
///
/// Returns `Ok(None)` for every skippable condition (missing audio, filtered
/// attribute, missing sibling); wrong field arity, unknown attribute codes
/// and malformed JSON are fatal.
pub fn validate<N: Normalize>(
    line: &str,
    config: &IngestConfig,
    filter: &AttributeFilter,
    normalizer: &N,
) -> Result<Option<Record>> {
    let fields: Vec<&str> = line.trim().split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(Error::MetadataLine(format!(
            "expected {FIELD_COUNT} fields, got {}: {line:?}",
            fields.len()
        )));
    }

    // field 0 is the audio path with its leading separator stripped
    let mut path_chars = fields[0].chars();
    path_chars.next();
    let relative = path_chars.as_str();

    let attributes = Attributes::parse(fields[3], fields[4], fields[6], fields[7], fields[8])?;

    let file_path = config.audio_root.join(relative);
    if !file_path.exists() {
        return Ok(None);
    }

    if filter.excludes(&attributes) {
        return Ok(None);
    }

    let annotation_path = file_path.with_extension("json");
    let Some(annotation) = read_annotation(&annotation_path)? else {
        return Ok(None);
    };

    let transcript_path = file_path.with_extension("txt");
    if !transcript_path.exists() {
        return Ok(None);
    }
    let raw_text = std::fs::read_to_string(&transcript_path)?;
    let text = normalizer.normalize(&raw_text);

    Ok(Some(Record {
        file_path,
        attributes,
        start: annotation.start,
        end: annotation.end,
        length: annotation.length,
        id: annotation.id,
        text,
    }))
}

/// Read the sibling annotation; absent file is a skip, malformed JSON is fatal.
fn read_annotation(path: &Path) -> Result<Option<Annotation>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    let annotation = serde_json::from_str(&raw).map_err(|source| Error::Annotation {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(annotation))
}
