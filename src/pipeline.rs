use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalogue::CatalogueClient;
use crate::config::CatalogueProfile;
use crate::writer::DocumentWriter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub id: String,
    #[serde(default)]
    pub collections: Vec<String>,
}

impl ImportRecord {
    pub fn new(id: impl Into<String>, collections: Vec<String>) -> Self {
        Self {
            id: id.into(),
            collections,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    ExportFinished,
    InvalidIdentifier,
    InvalidData,
    LookupFailed,
    InvalidDocument,
    WriteFailed,
}

impl ImportStatus {
    pub fn is_success(self) -> bool {
        self == Self::ExportFinished
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub identifier: String,
    pub process_title: String,
    pub status: ImportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl ImportOutcome {
    fn failed(identifier: &str, status: ImportStatus, message: String) -> Self {
        Self {
            identifier: identifier.to_owned(),
            process_title: identifier.to_owned(),
            status,
            error_message: Some(message),
            output_path: None,
        }
    }
}

/// Receives one notification per submitted record, including skipped ones.
pub trait ProgressSink {
    fn advance(&self);
}

impl<F: Fn()> ProgressSink for F {
    fn advance(&self) {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self) {}
}

pub struct ImportPipeline<'a, C, W, P = NoProgress> {
    catalogue: C,
    writer: W,
    progress: P,
    profile: &'a CatalogueProfile,
    import_folder: &'a Path,
}

impl<'a, C, W> ImportPipeline<'a, C, W>
where
    C: CatalogueClient,
    W: DocumentWriter,
{
    pub fn new(
        catalogue: C,
        writer: W,
        profile: &'a CatalogueProfile,
        import_folder: &'a Path,
    ) -> Self {
        Self {
            catalogue,
            writer,
            progress: NoProgress,
            profile,
            import_folder,
        }
    }
}

impl<'a, C, W, P> ImportPipeline<'a, C, W, P>
where
    C: CatalogueClient,
    W: DocumentWriter,
    P: ProgressSink,
{
    pub fn with_progress<Q: ProgressSink>(self, progress: Q) -> ImportPipeline<'a, C, W, Q> {
        ImportPipeline {
            catalogue: self.catalogue,
            writer: self.writer,
            progress,
            profile: self.profile,
            import_folder: self.import_folder,
        }
    }

    /// Processes records strictly in order. Every failure is captured in the
    /// record's outcome; blank identifiers produce no outcome.
    pub fn run(&self, records: &[ImportRecord]) -> Vec<ImportOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            self.progress.advance();
            if record.id.trim().is_empty() {
                tracing::debug!("skipping blank identifier");
                continue;
            }
            tracing::info!(identifier = %record.id, "import record");
            let outcome = self.import_record(record);
            if let Some(error) = outcome.error_message.as_deref() {
                tracing::warn!(identifier = %record.id, status = ?outcome.status, error, "import failed");
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    pub fn import_record(&self, record: &ImportRecord) -> ImportOutcome {
        let identifier = record.id.as_str();

        let path = match crate::writer::output_path(self.import_folder, identifier) {
            Ok(path) => path,
            Err(err) => {
                return ImportOutcome::failed(
                    identifier,
                    ImportStatus::InvalidIdentifier,
                    err.to_string(),
                );
            }
        };

        let hit = match self.catalogue.lookup(identifier, self.profile) {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                return ImportOutcome::failed(
                    identifier,
                    ImportStatus::InvalidData,
                    format!("no record found for {identifier}"),
                );
            }
            Err(err) => {
                return ImportOutcome::failed(
                    identifier,
                    ImportStatus::LookupFailed,
                    format!("{identifier}: error during catalogue request: {err:#}"),
                );
            }
        };

        let mut document = hit.document;
        if let Err(err) = crate::enrich::attach_collections(&mut document, &record.collections) {
            return ImportOutcome::failed(
                identifier,
                ImportStatus::InvalidDocument,
                format!("{identifier}: {err}"),
            );
        }

        let process_title =
            match crate::title::derive_process_title(&hit.title_short_code, &document) {
                Ok(title) => title,
                Err(err) => {
                    tracing::error!(identifier, %err, "cannot derive process title; using identifier");
                    identifier.to_owned()
                }
            };

        if let Err(err) = self.writer.write(&path, &process_title, &document) {
            return ImportOutcome {
                identifier: identifier.to_owned(),
                process_title,
                status: ImportStatus::WriteFailed,
                error_message: Some(format!("{identifier}: write failed: {err:#}")),
                output_path: None,
            };
        }

        ImportOutcome {
            identifier: identifier.to_owned(),
            process_title,
            status: ImportStatus::ExportFinished,
            error_message: None,
            output_path: Some(path),
        }
    }
}
