use crate::core::{SoundCue, StepOutcome};

/// Snapshot handed to the terminal renderer each frame.
pub struct LevelRenderState {
    pub level_index: usize,
    pub level_count: usize,
    pub steps: u32,
    pub animating: bool,
    pub won: bool,
    pub last_outcome: Option<StepOutcome>,
    pub last_sound: Option<SoundCue>,
}
