//! Export of classification records to tabular (CSV) and structured
//! (JSON) artifacts.
//!
//! Export reads the session but never mutates it, so a failed export can
//! simply be retried with another "download".

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::dialogue::ClassifiedWord;
use crate::error::ExportError;

/// Everything an export needs: the records plus department and the
/// moment the export was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub department: String,
    /// ISO-8601 timestamp of the export request.
    pub collection_date: String,
    pub classified_words: Vec<ClassifiedWord>,
}

impl ExportReport {
    /// Build a report for the given records, stamped with the current time.
    pub fn new(department: &str, classified_words: &[ClassifiedWord]) -> Self {
        Self {
            department: department.to_string(),
            collection_date: Utc::now().to_rfc3339(),
            classified_words: classified_words.to_vec(),
        }
    }
}

/// Paths of the artifacts a successful export produced.
#[derive(Debug, Clone)]
pub struct ExportArtifacts {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

/// Narrow export seam so the agent can be tested with a fake.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(&self, report: &ExportReport) -> Result<ExportArtifacts, ExportError>;
}

/// Writes both artifacts into a directory with timestamped filenames
/// (`dmo_keywords_YYYYMMDD_HHMMSS.csv` / `.json`).
pub struct FileExporter {
    export_dir: PathBuf,
}

impl FileExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }
}

#[async_trait]
impl Exporter for FileExporter {
    async fn export(&self, report: &ExportReport) -> Result<ExportArtifacts, ExportError> {
        if report.classified_words.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        fs::create_dir_all(&self.export_dir).await?;
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let csv_path = self.export_dir.join(format!("dmo_keywords_{stamp}.csv"));
        let json_path = self.export_dir.join(format!("dmo_keywords_{stamp}.json"));

        fs::write(&csv_path, render_csv(&report.classified_words)).await?;
        fs::write(&json_path, serde_json::to_string_pretty(report)?).await?;

        tracing::info!(
            csv = %csv_path.display(),
            json = %json_path.display(),
            records = report.classified_words.len(),
            "export written"
        );

        Ok(ExportArtifacts { csv_path, json_path })
    }
}

/// Read a previously exported JSON artifact back into a report.
pub async fn read_json_report(path: &Path) -> Result<ExportReport, ExportError> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Render records as CSV, one row per record in order.
fn render_csv(records: &[ClassifiedWord]) -> String {
    let mut out = String::from("word,classification,department,timestamp\n");
    for record in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&record.word),
            record.classification,
            csv_field(&record.department),
            csv_field(&record.timestamp),
        ));
    }
    out
}

/// RFC 4180 quoting: wrap fields containing commas, quotes, or newlines.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
