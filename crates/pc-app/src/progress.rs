use pc_assay::CharacterizeStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Generating,
    Solving,
    AcceptingClosest,
    Assembling,
    Merging,
    Exporting,
    Completed,
}

impl From<CharacterizeStage> for ProgressStage {
    fn from(stage: CharacterizeStage) -> Self {
        match stage {
            CharacterizeStage::Generating => ProgressStage::Generating,
            CharacterizeStage::Solving => ProgressStage::Solving,
            CharacterizeStage::Assembling => ProgressStage::Assembling,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub stage: ProgressStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}
