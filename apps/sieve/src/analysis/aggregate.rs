//! Score aggregation: weighted sums of the five component values, rounded
//! to integers on the 0-100 scale. The overall and ATS scores use the same
//! machinery with different weight tables.

use std::collections::BTreeMap;

use crate::config::ComponentWeights;
use crate::models::{ComponentKind, ComponentScore, MAX_SCORE};

/// Weighted sum over a component table. A component absent from the map
/// contributes nothing.
pub fn weighted_score(
    scores: &BTreeMap<ComponentKind, ComponentScore>,
    weights: &ComponentWeights,
) -> u32 {
    let sum: f64 = ComponentKind::ALL
        .iter()
        .map(|kind| weights.get(*kind) * scores.get(kind).map_or(0.0, |s| s.value))
        .sum();
    sum.round().clamp(0.0, MAX_SCORE) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
