//! File-backed compound database.

use crate::schema::{CompoundDatabase, Upsert};
use crate::{ExportError, ExportResult};
use pc_correlations::ConstantPropertySet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Overwrite records whose name is already in the file.
    pub replace_existing: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            replace_existing: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// The file did not exist and was initialized.
    pub created_file: bool,
    pub added: usize,
    pub replaced: usize,
    pub skipped: usize,
    /// Records in the file after the export.
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct CompoundStore {
    path: PathBuf,
}

impl CompoundStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ExportError {
        ExportError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read and validate the database file.
    pub fn load(&self) -> ExportResult<CompoundDatabase> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let db: CompoundDatabase = serde_json::from_str(&content)?;
        db.check_schema()?;
        Ok(db)
    }

    /// Write `db` through a sibling temporary file so a failed write leaves the old file.
    ///
    /// Records with a NaN or infinite field are refused before anything is written.
    pub fn save(&self, db: &CompoundDatabase) -> ExportResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        for record in &db.compounds {
            if let Some(field) = record.non_finite_field() {
                return Err(ExportError::NonFinite {
                    name: record.name.clone(),
                    field,
                });
            }
        }
        let json = serde_json::to_string_pretty(db)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Append `records`, initializing the file first when it does not exist.
    pub fn export<'a>(
        &self,
        records: impl IntoIterator<Item = &'a ConstantPropertySet>,
        options: ExportOptions,
    ) -> ExportResult<ExportSummary> {
        let created_file = !self.path.exists();
        let mut db = if created_file {
            debug!(path = %self.path.display(), "initializing compound database");
            CompoundDatabase::new()
        } else {
            self.load()?
        };

        let (mut added, mut replaced, mut skipped) = (0, 0, 0);
        for record in records {
            match db.upsert(record, options.replace_existing) {
                Upsert::Added => added += 1,
                Upsert::Replaced => replaced += 1,
                Upsert::Skipped => skipped += 1,
            }
        }
        db.touch();
        self.save(&db)?;

        let summary = ExportSummary {
            path: self.path.clone(),
            created_file,
            added,
            replaced,
            skipped,
            total: db.compounds.len(),
        };
        info!(
            path = %self.path.display(),
            added,
            replaced,
            skipped,
            total = summary.total,
            "exported compounds"
        );
        Ok(summary)
    }
}
