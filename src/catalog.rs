//! Pair datasets: a built-in category plus loading extra ones from JSON.
use crate::error::Result;
use crate::models::{Category, Pair};
use log::info;
use std::fs;
use std::path::Path;

/// word1, word2, difficulty, ipa1, ipa2, group
type Row = (&'static str, &'static str, u8, &'static str, &'static str, &'static str);

const SPANISH_SPEAKERS: &[Row] = &[
    // iː ~ ɪ
    ("sheep", "ship", 1, "/ʃiːp/", "/ʃɪp/", "iVsI"),
    ("leave", "live", 2, "/liːv/", "/lɪv/", "iVsI"),
    ("beat", "bit", 3, "/biːt/", "/bɪt/", "iVsI"),
    ("feet", "fit", 4, "/fiːt/", "/fɪt/", "iVsI"),
    // ʌ ~ ɑː
    ("cut", "cot", 1, "/kʌt/", "/kɑːt/", "uhVsAh"),
    ("luck", "lock", 2, "/lʌk/", "/lɑːk/", "uhVsAh"),
    ("cup", "cop", 3, "/kʌp/", "/kɑːp/", "uhVsAh"),
    ("duck", "dock", 4, "/dʌk/", "/dɑːk/", "uhVsAh"),
    // æ ~ ɛ
    ("bad", "bed", 1, "/bæd/", "/bɛd/", "aVsE"),
    ("pan", "pen", 2, "/pæn/", "/pɛn/", "aVsE"),
    ("dad", "dead", 3, "/dæd/", "/dɛd/", "aVsE"),
    ("bat", "bet", 4, "/bæt/", "/bɛt/", "aVsE"),
    // b ~ v
    ("ban", "van", 1, "/bæn/", "/væn/", "bV"),
    ("berry", "very", 2, "/ˈbɛri/", "/ˈvɛri/", "bV"),
    ("bow", "vow", 3, "/baʊ/", "/vaʊ/", "bV"),
    ("ball", "wall", 4, "/bɔːl/", "/wɔːl/", "bV"),
    // θ ~ s
    ("thin", "sin", 1, "/θɪn/", "/sɪn/", "thetaS"),
    ("thick", "sick", 2, "/θɪk/", "/sɪk/", "thetaS"),
    ("think", "sink", 3, "/θɪŋk/", "/sɪŋk/", "thetaS"),
    ("theme", "seem", 4, "/θiːm/", "/siːm/", "thetaS"),
];

fn make(&(word1, word2, difficulty, ipa1, ipa2, group): &Row) -> Pair {
    Pair {
        word1: word1.to_string(),
        word2: word2.to_string(),
        ipa1: ipa1.to_string(),
        ipa2: ipa2.to_string(),
        difficulty,
        group: group.to_string(),
        variant_rate: None,
        audio1: format!("audio/{}.mp3", word1),
        audio2: format!("audio/{}.mp3", word2),
    }
}

pub fn builtin_categories() -> Vec<Category> {
    vec![Category {
        category: "español".to_string(),
        pairs: SPANISH_SPEAKERS.iter().map(make).collect(),
    }]
}

/// Reads a JSON array of categories.
pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    let contents = fs::read_to_string(path)?;
    let categories: Vec<Category> = serde_json::from_str(&contents)?;
    info!("Loaded {} categories from {:?}", categories.len(), path);
    Ok(categories)
}

pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.category == name)
}
