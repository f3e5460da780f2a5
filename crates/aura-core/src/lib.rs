//! aura-core — Facial aesthetics report model, image intake, and the
//! session state machine that drives a remote analysis attempt.

pub mod intake;
pub mod report;
pub mod session;

pub use intake::{Angle, EncodedImage, MultiAngleImages};
pub use report::{AnalyzeError, FacialReport};
pub use session::{AnalysisState, Analyzer, Session};
