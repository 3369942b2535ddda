//! Assay sample classification.

use serde::{Deserialize, Serialize};

/// Assay type. Selects the correlation method set and the default distribution shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SampleType {
    /// Light distillates (naphtha, condensate)
    #[default]
    Light,
    /// Middle distillates and typical crude C7+ fractions
    Average,
    /// Heavy fractions (gas oils, residues)
    Heavy,
}

impl SampleType {
    pub const ALL: [SampleType; 3] = [SampleType::Light, SampleType::Average, SampleType::Heavy];

    pub fn key(&self) -> &'static str {
        match self {
            SampleType::Light => "light",
            SampleType::Average => "average",
            SampleType::Heavy => "heavy",
        }
    }

    /// Parse a case-insensitive key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
