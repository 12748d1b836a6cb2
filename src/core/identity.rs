use indexmap::IndexSet;
use uuid::Uuid;

use crate::core::{EnhancedVariation, Variation};

/// Attaches a stable series key to every variation.
///
/// Variations with a natural id reuse its decimal form, which keeps keys
/// stable across sessions. Variations without one get a random UUID that
/// is only stable for the current load. Duplicate natural ids are kept as
/// they are; deduplicating them is the data producer's job.
#[must_use]
pub fn enhance_variations(variations: &[Variation]) -> Vec<EnhancedVariation> {
    variations
        .iter()
        .map(|variation| EnhancedVariation {
            natural_id: variation.natural_id,
            name: variation.name.clone(),
            stable_id: variation
                .natural_id
                .map_or_else(|| Uuid::new_v4().to_string(), |id| id.to_string()),
        })
        .collect()
}

/// Stable ids in dataset order with duplicates removed.
#[must_use]
pub fn available_variation_ids(variations: &[EnhancedVariation]) -> Vec<String> {
    variations
        .iter()
        .map(|variation| variation.stable_id.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
