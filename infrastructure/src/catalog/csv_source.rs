//! CSV-backed metadata catalog.
//!
//! Two layouts are understood, told apart by the header row:
//!
//! - **long**: one row per rendering, with `model_id`, `audio_ref`,
//!   `transcript` and optional `version` / `reference_score` columns
//! - **wide**: one row per utterance, a `transcript` (or `transcriptions`)
//!   column and one column per model holding the audio file name
//!
//! A header containing `audio_ref` selects the long layout.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use ttseval_application::ports::catalog_source::{CatalogError, CatalogSource};
use ttseval_domain::{Catalog, Subject};

const TRANSCRIPT_COLUMNS: [&str; 2] = ["transcript", "transcriptions"];
const REFERENCE_COLUMNS: [&str; 2] = ["reference_score", "baseline_score"];

/// Shape of the catalog table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLayout {
    Wide,
    Long,
}

impl CatalogLayout {
    pub fn detect(headers: &StringRecord) -> Self {
        if headers.iter().any(|h| h == "audio_ref") {
            CatalogLayout::Long
        } else {
            CatalogLayout::Wide
        }
    }
}

/// Loads a [`Catalog`] from a CSV file
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, line: u64, message: impl Into<String>) -> CatalogError {
        CatalogError::Malformed {
            path: self.path.clone(),
            line,
            message: message.into(),
        }
    }

    fn missing_column(&self, column: &str) -> CatalogError {
        CatalogError::MissingColumn {
            path: self.path.clone(),
            column: column.to_string(),
        }
    }

    fn csv_error(&self, e: csv::Error) -> CatalogError {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(source) => CatalogError::Io {
                path: self.path.clone(),
                source,
            },
            _ => self.malformed(line, message),
        }
    }

    fn rows(&self) -> Result<(StringRecord, Vec<(u64, StringRecord)>), CatalogError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.csv_error(e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push((line, record));
        }
        Ok((headers, rows))
    }

    fn parse_reference(&self, line: u64, value: Option<&str>) -> Result<Option<f64>, CatalogError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(v) => v
                .parse::<f64>()
                .map(Some)
                .map_err(|_| self.malformed(line, format!("reference score '{}' is not a number", v))),
        }
    }

    fn load_wide(
        &self,
        headers: &StringRecord,
        rows: Vec<(u64, StringRecord)>,
    ) -> Result<Catalog, CatalogError> {
        let transcript_idx = find_column(headers, &TRANSCRIPT_COLUMNS)
            .ok_or_else(|| self.missing_column("transcript"))?;
        let reference_idx = find_column(headers, &REFERENCE_COLUMNS);

        let model_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != transcript_idx && Some(*i) != reference_idx && !h.is_empty())
            .map(|(i, h)| (i, h.to_string()))
            .collect();
        if model_columns.is_empty() {
            return Err(self.missing_column("model audio column"));
        }

        let mut subjects = Vec::new();
        for (item, (line, row)) in rows.into_iter().enumerate() {
            let transcript = row.get(transcript_idx).unwrap_or("").trim();
            let reference = self.parse_reference(line, reference_idx.and_then(|i| row.get(i)))?;
            for (idx, model) in &model_columns {
                let mut subject =
                    Subject::new(model.as_str(), row.get(*idx).unwrap_or(""), transcript, item);
                if let Some(reference) = reference {
                    subject = subject.with_reference_score(reference);
                }
                subjects.push(subject);
            }
        }

        let models = model_columns.into_iter().map(|(_, m)| m).collect();
        Ok(Catalog::with_models(models, subjects))
    }

    fn load_long(
        &self,
        headers: &StringRecord,
        rows: Vec<(u64, StringRecord)>,
    ) -> Result<Catalog, CatalogError> {
        let model_idx =
            find_column(headers, &["model_id"]).ok_or_else(|| self.missing_column("model_id"))?;
        let audio_idx =
            find_column(headers, &["audio_ref"]).ok_or_else(|| self.missing_column("audio_ref"))?;
        let transcript_idx = find_column(headers, &TRANSCRIPT_COLUMNS)
            .ok_or_else(|| self.missing_column("transcript"))?;
        let version_idx = find_column(headers, &["version"]);
        let reference_idx = find_column(headers, &REFERENCE_COLUMNS);

        let mut items: HashMap<String, usize> = HashMap::new();
        let mut subjects = Vec::new();
        for (line, row) in rows {
            let model = row.get(model_idx).unwrap_or("").trim();
            if model.is_empty() {
                return Err(self.malformed(line, "model_id is empty"));
            }
            let transcript = row.get(transcript_idx).unwrap_or("").trim();
            let next_item = items.len();
            let item = *items.entry(transcript.to_string()).or_insert(next_item);

            let mut subject =
                Subject::new(model, row.get(audio_idx).unwrap_or(""), transcript, item);
            if let Some(version) = version_idx
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
            {
                subject = subject.with_version(version);
            }
            if let Some(reference) =
                self.parse_reference(line, reference_idx.and_then(|i| row.get(i)))?
            {
                subject = subject.with_reference_score(reference);
            }
            subjects.push(subject);
        }

        Ok(Catalog::new(subjects))
    }
}

impl CatalogSource for CsvCatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        if !self.path.is_file() {
            return Err(CatalogError::MissingSource(self.path.clone()));
        }

        let (headers, rows) = self.rows()?;
        let layout = CatalogLayout::detect(&headers);
        debug!("Catalog {} uses the {:?} layout", self.path.display(), layout);

        let catalog = match layout {
            CatalogLayout::Wide => self.load_wide(&headers, rows)?,
            CatalogLayout::Long => self.load_long(&headers, rows)?,
        };
        info!(
            "Loaded {} subjects for {} models from {}",
            catalog.len(),
            catalog.models().len(),
            self.path.display()
        );
        Ok(catalog)
    }
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvCatalogSource::new(dir.path().join("nope.csv"));
        let err = source.load().unwrap_err();
        assert!(matches!(err, CatalogError::MissingSource(_)));
    }

    #[test]
    fn test_wide_layout() {
        let (_dir, path) = write_csv(
            "transcriptions,tts_v1,tts_v2\n\
             hello,s1.wav,t1.wav\n\
             world,s2.wav,\n",
        );
        let catalog = CsvCatalogSource::new(&path).load().unwrap();

        assert_eq!(catalog.models(), &["tts_v1".to_string(), "tts_v2".to_string()]);
        assert_eq!(catalog.len(), 4);
        let v1: Vec<_> = catalog.subjects_for("tts_v1", None).collect();
        assert_eq!(v1[1].audio_ref, "s2.wav");
        assert_eq!(v1[1].transcript, "world");
        assert_eq!(v1[1].item, 1);
        let v2: Vec<_> = catalog.subjects_for("tts_v2", None).collect();
        assert!(!v2[1].has_audio_ref());
    }

    #[test]
    fn test_padded_cells_are_trimmed() {
        let (_dir, path) = write_csv("transcript,tts_v1,tts_v2\nhello, s1.wav , t1.wav\n");
        let catalog = CsvCatalogSource::new(&path).load().unwrap();
        let v1: Vec<_> = catalog.subjects_for("tts_v1", None).collect();
        assert_eq!(v1[0].audio_ref, "s1.wav");
        let v2: Vec<_> = catalog.subjects_for("tts_v2", None).collect();
        assert_eq!(v2[0].audio_ref, "t1.wav");
    }

    #[test]
    fn test_wide_without_transcript_is_missing_column() {
        let (_dir, path) = write_csv("tts_v1,tts_v2\ns1.wav,t1.wav\n");
        let err = CsvCatalogSource::new(&path).load().unwrap_err();
        assert!(
            matches!(err, CatalogError::MissingColumn { ref column, .. } if column == "transcript")
        );
    }

    #[test]
    fn test_wide_without_models_is_missing_column() {
        let (_dir, path) = write_csv("transcript\nhello\n");
        let err = CsvCatalogSource::new(&path).load().unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { .. }));
    }

    #[test]
    fn test_long_layout_with_versions_and_references() {
        let (_dir, path) = write_csv(
            "model_id,version,audio_ref,transcript,reference_score\n\
             tts_v1,r1,a.wav,hello,\n\
             tts_v1,r2,a.wav,hello,\n\
             ref,,sample_0.wav,world,3\n",
        );
        let catalog = CsvCatalogSource::new(&path).load().unwrap();

        assert_eq!(catalog.versions("tts_v1"), vec!["r1", "r2"]);
        assert_eq!(catalog.subjects_for("tts_v1", Some("r2")).count(), 1);
        let reference = catalog.subjects_for("ref", None).next().unwrap();
        assert_eq!(reference.version, None);
        assert_eq!(reference.reference_score, Some(3.0));
        assert_eq!(reference.item, 1);
    }

    #[test]
    fn test_long_without_model_column() {
        let (_dir, path) = write_csv("audio_ref,transcript\na.wav,hello\n");
        let err = CsvCatalogSource::new(&path).load().unwrap_err();
        assert!(
            matches!(err, CatalogError::MissingColumn { ref column, .. } if column == "model_id")
        );
    }

    #[test]
    fn test_bad_reference_score_is_malformed() {
        let (_dir, path) = write_csv(
            "model_id,audio_ref,transcript,reference_score\n\
             ref,a.wav,hello,high\n",
        );
        let err = CsvCatalogSource::new(&path).load().unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_detect_layout() {
        let long = StringRecord::from(vec!["model_id", "audio_ref", "transcript"]);
        let wide = StringRecord::from(vec!["transcript", "tts_v1"]);
        assert_eq!(CatalogLayout::detect(&long), CatalogLayout::Long);
        assert_eq!(CatalogLayout::detect(&wide), CatalogLayout::Wide);
    }
}
