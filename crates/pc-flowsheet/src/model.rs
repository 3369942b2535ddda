//! Simulation store model.

use pc_correlations::ConstantPropertySet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Overall mixture; the primary phase that carries the stream composition.
    Mixture,
    Vapor,
    OverallLiquid,
    Liquid1,
    Liquid2,
    Aqueous,
    Solid,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 7] = [
        PhaseKind::Mixture,
        PhaseKind::Vapor,
        PhaseKind::OverallLiquid,
        PhaseKind::Liquid1,
        PhaseKind::Liquid2,
        PhaseKind::Aqueous,
        PhaseKind::Solid,
    ];

    pub const PRIMARY: PhaseKind = PhaseKind::Mixture;
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhaseKind::Mixture => "mixture",
            PhaseKind::Vapor => "vapor",
            PhaseKind::OverallLiquid => "overall liquid",
            PhaseKind::Liquid1 => "liquid 1",
            PhaseKind::Liquid2 => "liquid 2",
            PhaseKind::Aqueous => "aqueous",
            PhaseKind::Solid => "solid",
        };
        f.write_str(s)
    }
}

/// A compound entry inside one phase. Each entry owns its constant-property record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseCompound {
    pub name: String,
    #[serde(default)]
    pub mole_fraction: f64,
    #[serde(default)]
    pub mass_fraction: f64,
    pub constants: ConstantPropertySet,
}

impl PhaseCompound {
    /// Zero-fraction entry carrying its own copy of `constants`.
    pub fn new(constants: &ConstantPropertySet) -> Self {
        Self {
            name: constants.name.clone(),
            mole_fraction: 0.0,
            mass_fraction: 0.0,
            constants: constants.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    #[serde(default)]
    pub compounds: Vec<PhaseCompound>,
}

impl Phase {
    pub fn new(kind: PhaseKind) -> Self {
        Self {
            kind,
            compounds: Vec::new(),
        }
    }

    pub fn compound(&self, name: &str) -> Option<&PhaseCompound> {
        self.compounds.iter().find(|c| c.name == name)
    }

    pub fn compound_mut(&mut self, name: &str) -> Option<&mut PhaseCompound> {
        self.compounds.iter_mut().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.compound(name).is_some()
    }

    /// Add a zero-fraction entry unless one with the same name exists.
    pub fn ensure_compound(&mut self, constants: &ConstantPropertySet) -> bool {
        if self.contains(&constants.name) {
            return false;
        }
        self.compounds.push(PhaseCompound::new(constants));
        true
    }

    pub fn mass_fraction_sum(&self) -> f64 {
        self.compounds.iter().map(|c| c.mass_fraction).sum()
    }

    pub fn mole_fraction_sum(&self) -> f64 {
        self.compounds.iter().map(|c| c.mole_fraction).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialStream {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl MaterialStream {
    /// New stream with every phase present and empty.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tag: tag.into(),
            phases: PhaseKind::ALL.iter().map(|&k| Phase::new(k)).collect(),
        }
    }

    pub fn phase(&self, kind: PhaseKind) -> Option<&Phase> {
        self.phases.iter().find(|p| p.kind == kind)
    }

    pub fn phase_mut(&mut self, kind: PhaseKind) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.kind == kind)
    }

    pub fn primary(&self) -> Option<&Phase> {
        self.phase(PhaseKind::PRIMARY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStream {
    pub id: String,
    pub tag: String,
    /// [W]
    #[serde(default)]
    pub power_w: f64,
}

impl EnergyStream {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tag: tag.into(),
            power_w: 0.0,
        }
    }
}

/// Flowsheet object; only material streams carry compounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimObject {
    Material(MaterialStream),
    Energy(EnergyStream),
}

impl SimObject {
    pub fn id(&self) -> &str {
        match self {
            SimObject::Material(s) => &s.id,
            SimObject::Energy(s) => &s.id,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            SimObject::Material(s) => &s.tag,
            SimObject::Energy(s) => &s.tag,
        }
    }
}

/// The compound registry and objects of one simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub available_compounds: BTreeMap<String, ConstantPropertySet>,
    #[serde(default)]
    pub selected_compounds: Vec<String>,
    #[serde(default)]
    pub objects: Vec<SimObject>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under its name. Returns `false` when the name is already taken.
    pub fn register_compound(&mut self, constants: &ConstantPropertySet) -> bool {
        if self.available_compounds.contains_key(&constants.name) {
            return false;
        }
        self.available_compounds
            .insert(constants.name.clone(), constants.clone());
        true
    }

    /// Select a registered compound. Returns `false` when already selected.
    pub fn select_compound(&mut self, name: &str) -> bool {
        if self.selected_compounds.iter().any(|n| n == name) {
            return false;
        }
        self.selected_compounds.push(name.to_string());
        true
    }

    /// Selected compounds that have a registry record, in selection order.
    pub fn selected_records(&self) -> impl Iterator<Item = &ConstantPropertySet> {
        self.selected_compounds
            .iter()
            .filter_map(|n| self.available_compounds.get(n))
    }

    pub fn add_object(&mut self, object: SimObject) -> &SimObject {
        self.objects.push(object);
        &self.objects[self.objects.len() - 1]
    }

    pub fn material_streams(&self) -> impl Iterator<Item = &MaterialStream> {
        self.objects.iter().filter_map(|o| match o {
            SimObject::Material(s) => Some(s),
            SimObject::Energy(_) => None,
        })
    }

    pub fn material_streams_mut(&mut self) -> impl Iterator<Item = &mut MaterialStream> {
        self.objects.iter_mut().filter_map(|o| match o {
            SimObject::Material(s) => Some(s),
            SimObject::Energy(_) => None,
        })
    }

    pub fn stream(&self, id: &str) -> Option<&MaterialStream> {
        self.material_streams().find(|s| s.id == id)
    }

    pub fn stream_by_tag(&self, tag: &str) -> Option<&MaterialStream> {
        self.material_streams().find(|s| s.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_correlations::{PropertyTriple, SampleType, estimate};

    fn record(name: &str) -> ConstantPropertySet {
        estimate(name, PropertyTriple::new(80.0, 0.70, 333.0), SampleType::Light).unwrap()
    }

    #[test]
    fn new_stream_has_every_phase() {
        let stream = MaterialStream::new("S1");
        assert_eq!(stream.phases.len(), PhaseKind::ALL.len());
        assert!(stream.primary().unwrap().compounds.is_empty());
        assert!(!stream.id.is_empty());
    }

    #[test]
    fn registry_and_selection_ignore_duplicates() {
        let mut sim = Simulation::new();
        assert!(sim.register_compound(&record("A")));
        assert!(!sim.register_compound(&record("A")));
        assert!(sim.select_compound("A"));
        assert!(!sim.select_compound("A"));
        assert_eq!(sim.selected_records().count(), 1);
    }

    #[test]
    fn phase_entries_are_owned_copies() {
        let mut phase = Phase::new(PhaseKind::Vapor);
        let mut props = record("A");
        assert!(phase.ensure_compound(&props));
        assert!(!phase.ensure_compound(&props));
        props.molar_weight = 1.0;
        assert_eq!(phase.compound("A").unwrap().constants.molar_weight, 80.0);
    }

    #[test]
    fn material_stream_filter_skips_energy() {
        let mut sim = Simulation::new();
        sim.add_object(SimObject::Energy(EnergyStream::new("E1")));
        sim.add_object(SimObject::Material(MaterialStream::new("S1")));
        assert_eq!(sim.material_streams().count(), 1);
        assert!(sim.stream_by_tag("S1").is_some());
        assert!(sim.stream_by_tag("E1").is_none());
    }

    #[test]
    fn yaml_round_trip_keeps_objects() {
        let mut sim = Simulation::new();
        sim.add_object(SimObject::Material(MaterialStream::new("FEED")));
        sim.add_object(SimObject::Energy(EnergyStream::new("Q1")));
        let text = serde_yaml::to_string(&sim).unwrap();
        assert!(text.contains("type: Material"));
        let back: Simulation = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back.objects.len(), 2);
        assert_eq!(back.objects[0].tag(), "FEED");
    }
}
