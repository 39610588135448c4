//! A minimal pair is two words that differ by a single sound contrast.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub word1: String,
    pub word2: String,
    pub ipa1: String,
    pub ipa2: String,
    /// Lexical tier, 1 (easy) to 4 (very hard).
    pub difficulty: u8,
    /// Contrast group; the same phonemic contrast across tiers.
    pub group: String,
    /// Custom playback rate overriding the speed table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_rate: Option<f64>,
    pub audio1: String,
    pub audio2: String,
}

impl Pair {
    /// ID used for tracking progress: `{category}__{group}__{word1}_{word2}`.
    pub fn id(&self, category: &str) -> String {
        format!("{}__{}__{}_{}", category, self.group, self.word1, self.word2)
    }

    /// Key for the difficulty state of this pair's contrast group within a
    /// category: `{category}__{group}`.
    pub fn group_key(&self, category: &str) -> String {
        format!("{}__{}", category, self.group)
    }
}

/// All pairs offered to speakers of one first language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    pub pairs: Vec<Pair>,
}
