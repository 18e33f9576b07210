pub mod flow;
pub mod sm2;

pub use flow::{DifficultyAdjustment, FlowDirection, FlowState, adjust_difficulty};
pub use sm2::{Sm2Result, accuracy_to_quality, calculate_sm2, clamp_quality};
