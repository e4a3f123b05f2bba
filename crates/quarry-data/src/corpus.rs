//! Corpus loading from JSON Lines files or `pos/` + `neg/` directory trees.

use std::fs;
use std::path::Path;

use quarry_core::errors::DataError;
use quarry_core::types::{Example, Label};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

/// One raw labeled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub text: String,
    pub label: Label,
}

impl Document {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// An ordered collection of labeled documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    documents: Vec<Document>,
}

#[derive(Deserialize)]
struct JsonlRecord {
    text: String,
    label: serde_json::Value,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load a JSON Lines file: one `{"text": ..., "label": ...}` object per
    /// line, where `label` is `0`/`1` or `"neg"`/`"pos"`. Blank lines are
    /// skipped.
    pub fn load_jsonl(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let mut documents = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let malformed = |message: String| DataError::MalformedRecord {
                path: path.display().to_string(),
                line: line_no,
                message,
            };
            let record: JsonlRecord =
                serde_json::from_str(line).map_err(|e| malformed(e.to_string()))?;
            let label = parse_label_value(&record.label)
                .ok_or_else(|| malformed(format!("unrecognized label {}", record.label)))?;
            documents.push(Document::new(record.text, label));
        }

        if documents.is_empty() {
            return Err(DataError::EmptyCorpus);
        }
        info!(path = %path.display(), documents = documents.len(), "loaded JSONL corpus");
        Ok(Self { documents })
    }

    /// Load a review-corpus style tree: every `*.txt` under `root/neg` is
    /// negative and every `*.txt` under `root/pos` is positive. Files are
    /// read in sorted name order.
    pub fn load_labeled_dirs(root: &Path) -> Result<Self, DataError> {
        let mut documents = Vec::new();

        for (subdir, label) in [("neg", Label::Negative), ("pos", Label::Positive)] {
            let dir = root.join(subdir);
            if !dir.is_dir() {
                return Err(DataError::Io {
                    path: dir.display().to_string(),
                    message: "expected a directory".to_string(),
                });
            }

            let mut count = 0usize;
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry.map_err(|e| DataError::Io {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?;
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some("txt")
                {
                    continue;
                }
                let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
                documents.push(Document::new(text, label));
                count += 1;
            }
            debug!(dir = %dir.display(), label = %label, files = count, "read class directory");
        }

        if documents.is_empty() {
            return Err(DataError::EmptyCorpus);
        }
        info!(root = %root.display(), documents = documents.len(), "loaded directory corpus");
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents with `label`.
    pub fn count(&self, label: Label) -> usize {
        self.documents.iter().filter(|d| d.label == label).count()
    }

    /// Reorder the corpus with a seeded shuffle. The same seed always gives
    /// the same order.
    pub fn shuffled(mut self, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.documents.shuffle(&mut rng);
        self
    }

    /// Convert into examples with ids assigned in corpus order.
    pub fn into_examples(self) -> Vec<Example<String>> {
        self.documents
            .into_iter()
            .enumerate()
            .map(|(idx, doc)| Example::new(idx as u64, doc.text, doc.label))
            .collect()
    }
}

fn parse_label_value(value: &serde_json::Value) -> Option<Label> {
    match value {
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(v) => u8::try_from(v).ok().and_then(Label::from_u8),
            // 0.0 and 1.0 only; any other float is not a label
            None => match n.as_f64() {
                Some(v) if v == 0.0 => Some(Label::Negative),
                Some(v) if v == 1.0 => Some(Label::Positive),
                _ => None,
            },
        },
        serde_json::Value::String(s) => Label::parse(s),
        serde_json::Value::Bool(b) => Some(if *b { Label::Positive } else { Label::Negative }),
        _ => None,
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DataError {
    DataError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
