//! Picks which pairs of a category are offered, based on each contrast
//! group's lexical tier.
use super::{DifficultyController, Pair};
use crate::config::TrainerConfig;

/// One pair per contrast group of `category`: the pair whose difficulty
/// matches the group's current lexical tier. Groups keep the order in which
/// they first appear; a group with no pair at its tier is left out.
pub fn visible_pairs<'a>(
    pairs: &'a [Pair],
    category: &str,
    controller: &DifficultyController,
) -> Vec<&'a Pair> {
    let mut groups: Vec<&Pair> = Vec::new();
    for pair in pairs {
        if !groups.iter().any(|g| g.group == pair.group) {
            groups.push(pair);
        }
    }

    groups
        .into_iter()
        .filter_map(|first| {
            let tier = controller.lexical_tier(&first.group_key(category));
            pairs
                .iter()
                .find(|p| p.group == first.group && p.difficulty == tier)
        })
        .collect()
}

/// The first `limit` pairs at a given difficulty.
pub fn pairs_at_difficulty(pairs: &[Pair], difficulty: u8, limit: usize) -> Vec<&Pair> {
    pairs
        .iter()
        .filter(|p| p.difficulty == difficulty)
        .take(limit)
        .collect()
}

/// Playback rate for a pair at its group's current speed tier.
pub fn playback_rate(
    pair: &Pair,
    category: &str,
    controller: &DifficultyController,
    config: &TrainerConfig,
) -> f64 {
    pair.variant_rate.unwrap_or_else(|| {
        config.playback_rate(controller.speed_tier(&pair.group_key(category)))
    })
}
