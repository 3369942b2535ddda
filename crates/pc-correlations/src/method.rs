//! Versioned correlation methods and the per-sample-type method sets.

use crate::domain::Domain;
use crate::sample::SampleType;
use std::fmt;

/// Name and revision of a correlation. Rendered as `name@version`.
///
/// The version is bumped whenever coefficients or unit handling of a method change, so
/// exported records stay traceable to the exact formula that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    pub name: &'static str,
    pub version: u32,
}

impl MethodId {
    pub const fn new(name: &'static str, version: u32) -> Self {
        Self { name, version }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

pub const RIAZI_DAUBERT_1980: MethodId = MethodId::new("riazi-daubert-1980", 1);
pub const RIAZI_DAUBERT_1987: MethodId = MethodId::new("riazi-daubert-1987", 1);
pub const LEE_KESLER_1976: MethodId = MethodId::new("lee-kesler-1976", 1);
pub const EDMISTER_1958: MethodId = MethodId::new("edmister-1958", 1);
pub const HALL_YARBOROUGH_1971: MethodId = MethodId::new("hall-yarborough-1971", 1);
pub const LEE_KESLER_ZC: MethodId = MethodId::new("lee-kesler-zc", 1);
pub const KESLER_LEE_CP: MethodId = MethodId::new("kesler-lee-cp-1976", 1);
pub const YAMADA_GUNN_1973: MethodId = MethodId::new("yamada-gunn-1973", 1);
pub const RIEDEL_1954: MethodId = MethodId::new("riedel-1954", 1);
pub const ABBOTT_1971: MethodId = MethodId::new("abbott-1971", 1);

/// Critical-constant correlation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalMethod {
    RiaziDaubert1980,
    RiaziDaubert1987,
    LeeKesler,
}

/// Acentric-factor correlation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcentricMethod {
    Edmister,
    LeeKesler,
}

/// Critical-volume correlation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalVolumeMethod {
    HallYarborough,
    LeeKeslerZc,
}

/// The methods applied to one sample type, with the input domain they are all valid on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodSet {
    pub critical: CriticalMethod,
    pub acentric: AcentricMethod,
    pub critical_volume: CriticalVolumeMethod,
    pub domain: Domain,
}

impl MethodSet {
    pub fn for_sample(sample: SampleType) -> Self {
        match sample {
            SampleType::Light => Self {
                critical: CriticalMethod::RiaziDaubert1980,
                acentric: AcentricMethod::Edmister,
                critical_volume: CriticalVolumeMethod::HallYarborough,
                domain: Domain {
                    mw: (40.0, 400.0),
                    sg: (0.55, 0.95),
                    tb_k: (255.0, 650.0),
                },
            },
            SampleType::Average => Self {
                critical: CriticalMethod::RiaziDaubert1987,
                acentric: AcentricMethod::LeeKesler,
                critical_volume: CriticalVolumeMethod::HallYarborough,
                domain: Domain {
                    mw: (50.0, 700.0),
                    sg: (0.55, 1.10),
                    tb_k: (255.0, 850.0),
                },
            },
            SampleType::Heavy => Self {
                critical: CriticalMethod::LeeKesler,
                acentric: AcentricMethod::LeeKesler,
                critical_volume: CriticalVolumeMethod::LeeKeslerZc,
                domain: Domain {
                    mw: (50.0, 1500.0),
                    sg: (0.55, 1.30),
                    tb_k: (255.0, 1100.0),
                },
            },
        }
    }

    pub fn critical_id(&self) -> MethodId {
        match self.critical {
            CriticalMethod::RiaziDaubert1980 => RIAZI_DAUBERT_1980,
            CriticalMethod::RiaziDaubert1987 => RIAZI_DAUBERT_1987,
            CriticalMethod::LeeKesler => LEE_KESLER_1976,
        }
    }

    pub fn acentric_id(&self) -> MethodId {
        match self.acentric {
            AcentricMethod::Edmister => EDMISTER_1958,
            AcentricMethod::LeeKesler => LEE_KESLER_1976,
        }
    }

    pub fn critical_volume_id(&self) -> MethodId {
        match self.critical_volume {
            CriticalVolumeMethod::HallYarborough => HALL_YARBOROUGH_1971,
            CriticalVolumeMethod::LeeKeslerZc => LEE_KESLER_ZC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_id_display() {
        assert_eq!(RIAZI_DAUBERT_1980.to_string(), "riazi-daubert-1980@1");
    }

    #[test]
    fn sample_types_switch_critical_method() {
        let light = MethodSet::for_sample(SampleType::Light);
        let average = MethodSet::for_sample(SampleType::Average);
        let heavy = MethodSet::for_sample(SampleType::Heavy);
        assert_ne!(light.critical_id(), average.critical_id());
        assert_ne!(average.critical_id(), heavy.critical_id());
        assert!(heavy.domain.tb_k.1 > light.domain.tb_k.1);
    }
}
