// Data model: the Structured Document input contract and the Analysis
// Result output contract. Both sides of the engine boundary live here.

pub mod analysis;
pub mod document;

// Re-export the types the rest of the crate touches constantly.
pub use analysis::{
    AnalysisResult, ComponentKind, ComponentScore, Recommendation, RecommendationCategory,
    RedFlag, Severity, MAX_SCORE,
};
pub use document::{FileFormat, StructuredDocument};
