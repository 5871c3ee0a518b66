// Fixed vocabulary tables used by keyword extraction, claim detection and the
// word-list polarity engine.
//
// Tables are plain data: the built-in set is compiled in, and any section can be
// replaced from a JSON file without touching the algorithms that read them. Once
// loaded a `Lexicon` is never mutated, so it can be shared freely across threads.
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::models::SentimentClass;

const POSITIVE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "quality",
        &["high quality", "well made", "well built", "durable", "sturdy", "excellent", "solid", "premium"],
    ),
    (
        "performance",
        &["works great", "works perfectly", "fast", "powerful", "reliable", "efficient", "accurate", "smooth"],
    ),
    (
        "value",
        &["worth every penny", "great value", "value for money", "affordable", "bargain", "worth it"],
    ),
    (
        "experience",
        &["easy to use", "easy to clean", "comfortable", "amazing", "great", "good", "love", "beautiful"],
    ),
    (
        "satisfaction",
        &["highly recommend", "recommend", "happy", "satisfied", "perfect", "best", "exceeded expectations"],
    ),
];

const NEGATIVE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "quality",
        &["poor quality", "cheaply made", "flimsy", "broke", "broken", "defective", "leaking", "cheap"],
    ),
    (
        "performance",
        &["stopped working", "doesn't work", "does not work", "slow", "sluggish", "laggy", "inaccurate", "noisy"],
    ),
    (
        "value",
        &["waste of money", "not worth", "overpriced", "expensive", "rip off"],
    ),
    (
        "experience",
        &["hard to use", "uncomfortable", "difficult", "confusing", "frustrating", "terrible", "bad", "poor"],
    ),
    (
        "dissatisfaction",
        &["disappointed", "disappointing", "unhelpful", "worst", "hate", "regret", "refund", "return"],
    ),
];

const MARKETING_PHRASES: &[&str] = &[
    "best",
    "premium",
    "industry-leading",
    "revolutionary",
    "ultimate",
    "world-class",
    "cutting-edge",
    "state-of-the-art",
    "high-quality",
    "high-performance",
    "professional",
    "superior",
    "unmatched",
    "unbeatable",
    "innovative",
    "exceptional",
    "perfect",
    "luxury",
    "long-lasting",
    "durable",
    "comfortable",
    "easy to use",
    "lightweight",
    "powerful",
    "guaranteed",
    "immersive",
];

const CLAIM_NEGATORS: &[&str] = &[
    "not",
    "isn't",
    "doesn't",
    "barely",
    "hardly",
    "wasn't",
    "not very",
    "not really",
    "far from",
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "wonderful", "fantastic", "amazing", "awesome",
    "love", "loves", "loved", "happy", "pleased", "delighted", "satisfied", "perfect",
    "beautiful", "brilliant", "outstanding", "superb", "exceptional", "impressive",
    "best", "better", "comfortable", "easy", "enjoy", "recommend", "reliable",
    "durable", "smooth", "soft", "sturdy", "worth", "accurate", "helpful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate",
    "disappointed", "disappointing", "unhappy", "fail", "failed", "failure",
    "problem", "issue", "wrong", "broken", "broke", "defective", "flimsy",
    "uncomfortable", "frustrating", "frustrated", "useless", "waste", "overpriced",
    "sluggish", "slow", "inaccurate", "leaking", "unhelpful", "stiff", "loud",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "absolutely", "really", "incredibly", "highly", "totally", "so",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "none", "isn't", "wasn't",
    "doesn't", "don't", "didn't", "aren't", "won't", "can't",
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub phrases: Vec<String>,
}

/// Word lists consumed by the word-list polarity engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarityWords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub intensifiers: Vec<String>,
    pub negations: Vec<String>,
}

impl Default for PolarityWords {
    fn default() -> Self {
        Self {
            positive: owned(POSITIVE_WORDS),
            negative: owned(NEGATIVE_WORDS),
            intensifiers: owned(INTENSIFIERS),
            negations: owned(NEGATIONS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub positive_keywords: Vec<KeywordCategory>,
    pub negative_keywords: Vec<KeywordCategory>,
    pub marketing_phrases: Vec<String>,
    pub claim_negators: Vec<String>,
    pub polarity_words: PolarityWords,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    pub fn builtin() -> Self {
        Self {
            positive_keywords: categories(POSITIVE_KEYWORDS),
            negative_keywords: categories(NEGATIVE_KEYWORDS),
            marketing_phrases: owned(MARKETING_PHRASES),
            claim_negators: owned(CLAIM_NEGATORS),
            polarity_words: PolarityWords::default(),
        }
    }

    /// Loads a JSON lexicon. Sections missing from the file keep their built-in values.
    /// Entries are lowercased and trimmed to match normalized text; blank ones are dropped.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: display.clone(),
            source,
        })?;
        let mut lexicon: Lexicon =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| LexiconError::Parse {
                path: display,
                source,
            })?;
        lexicon.fold_case();
        Ok(lexicon)
    }

    fn fold_case(&mut self) {
        for category in self.positive_keywords.iter_mut().chain(self.negative_keywords.iter_mut()) {
            fold_all(&mut category.phrases);
        }
        fold_all(&mut self.marketing_phrases);
        fold_all(&mut self.claim_negators);
        let words = &mut self.polarity_words;
        for list in [
            &mut words.positive,
            &mut words.negative,
            &mut words.intensifiers,
            &mut words.negations,
        ] {
            fold_all(list);
        }
    }

    /// Keyword dictionary for a class. Neutral has none.
    pub fn keywords_for(&self, class: SentimentClass) -> &[KeywordCategory] {
        match class {
            SentimentClass::Positive => &self.positive_keywords,
            SentimentClass::Negative => &self.negative_keywords,
            SentimentClass::Neutral => &[],
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn fold_all(entries: &mut Vec<String>) {
    *entries = entries
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();
}

fn categories(table: &[(&str, &[&str])]) -> Vec<KeywordCategory> {
    table
        .iter()
        .map(|(name, phrases)| KeywordCategory {
            name: name.to_string(),
            phrases: owned(phrases),
        })
        .collect()
}
