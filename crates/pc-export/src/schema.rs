//! On-disk database schema.

use crate::{ExportError, ExportResult};
use pc_correlations::ConstantPropertySet;
use serde::{Deserialize, Serialize};

pub const SCHEMA_NAME: &str = "petrochar.compounds";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundDatabase {
    pub schema: String,
    pub version: u32,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
    #[serde(default)]
    pub compounds: Vec<ConstantPropertySet>,
}

/// Outcome of inserting one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Replaced,
    Skipped,
}

impl CompoundDatabase {
    /// Empty database stamped with the current time.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            schema: SCHEMA_NAME.to_string(),
            version: SCHEMA_VERSION,
            created_at: now.clone(),
            updated_at: now,
            compounds: Vec::new(),
        }
    }

    /// Reject files written by something else or by a newer version.
    pub fn check_schema(&self) -> ExportResult<()> {
        if self.schema != SCHEMA_NAME {
            return Err(ExportError::Schema {
                what: format!("expected schema '{SCHEMA_NAME}', found '{}'", self.schema),
            });
        }
        if self.version != SCHEMA_VERSION {
            return Err(ExportError::Schema {
                what: format!(
                    "unsupported version {} (this build reads version {SCHEMA_VERSION})",
                    self.version
                ),
            });
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ConstantPropertySet> {
        self.compounds.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.compounds.iter().map(|c| c.name.as_str()).collect()
    }

    /// Append `record`, or replace the same-named record in place when `replace` is set.
    pub fn upsert(&mut self, record: &ConstantPropertySet, replace: bool) -> Upsert {
        match self.compounds.iter_mut().find(|c| c.name == record.name) {
            Some(existing) if replace => {
                *existing = record.clone();
                Upsert::Replaced
            }
            Some(_) => Upsert::Skipped,
            None => {
                self.compounds.push(record.clone());
                Upsert::Added
            }
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for CompoundDatabase {
    fn default() -> Self {
        Self::new()
    }
}
