//! Shared corpus fixture for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

use kospeech_ingest::config::{IngestConfig, CORPUS_SUBDIR};

/// Temporary corpus tree mirroring the delivered layout.
pub struct CorpusFixture {
    dir: TempDir,
    pub audio_root: PathBuf,
    lines: Vec<String>,
}

impl CorpusFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let audio_root = dir.path().join(CORPUS_SUBDIR);
        std::fs::create_dir_all(&audio_root).unwrap();
        Self {
            dir,
            audio_root,
            lines: Vec::new(),
        }
    }

    pub fn config(&self) -> IngestConfig {
        IngestConfig::new(
            self.dir.path().to_path_buf(),
            self.dir.path().join("manifests"),
            Some(2),
        )
    }

    /// Add a complete utterance: WAV + JSON + transcript siblings.
    pub fn add_utterance(&mut self, stem: &str, sex: &str) {
        self.add_partial(stem, sex, true, true);
    }

    /// Add an utterance with optional siblings.
    pub fn add_partial(&mut self, stem: &str, sex: &str, with_json: bool, with_txt: bool) {
        self.write_wav(stem);
        if with_json {
            std::fs::write(
                self.audio_root.join(format!("{stem}.json")),
                format!(
                    r#"{{"start": 0.25, "end": 1.75, "length": 2.0, "metadata": "{stem}"}}"#
                ),
            )
            .unwrap();
        }
        if with_txt {
            std::fs::write(self.audio_root.join(format!("{stem}.txt")), "국물 맛").unwrap();
        }
        self.lines.push(format!(
            "/{stem}.wav | dialog | free | {sex} | A | seoul | 1 | 2 | 1"
        ));
    }

    /// Write the lines accumulated since the last call as a metadata list file.
    pub fn write_metadata(&mut self, name: &str) {
        let mut content = self.lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(
            self.audio_root.join(format!("{name}_metadata.txt")),
            content,
        )
        .unwrap();
        self.lines.clear();
    }

    fn write_wav(&self, stem: &str) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = self.audio_root.join(format!("{stem}.wav"));
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..1_600 {
            writer.write_sample((i % 128) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
}
