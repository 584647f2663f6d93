//! Quality gating: assessment parsing and the improvement loop state.

pub mod assessment;
pub mod gate;

pub use assessment::{
    Assessment, DEFAULT_SCORE, FALLBACK_IMPROVEMENTS, IMPROVEMENTS_MARKER, SCORE_MARKER,
    parse_improvements, parse_score,
};
pub use gate::{DEFAULT_THRESHOLD, IterationState, LoopDecision, QualityGate};
