// Polarity scoring and classification.
// The default engine is VADER; a small word-list engine is kept for deterministic,
// dependency-light scoring and for lexicon experiments.
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};
use vader_sentiment::SentimentIntensityAnalyzer;

use super::normalize::normalize;
use crate::lexicon::PolarityWords;
use crate::models::SentimentClass;

/// Score returned for empty text and for any scoring failure.
pub const NEUTRAL_SCORE: f64 = 0.5;

pub const POSITIVE_THRESHOLD: f64 = 0.5;
pub const NEUTRAL_THRESHOLD: f64 = 0.3;

#[derive(Debug, Error)]
pub enum ScoringFailure {
    #[error("engine returned no compound score")]
    MissingCompound,

    #[error("engine returned a non-finite compound score: {0}")]
    NonFinite(f64),

    #[error("engine panicked: {0}")]
    Panicked(String),
}

/// A lexicon/rule engine producing a compound polarity in [-1, 1].
pub trait PolarityEngine: Send + Sync {
    fn name(&self) -> &'static str;
    fn compound(&self, text: &str) -> Result<f64, ScoringFailure>;
}

pub struct VaderEngine {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderEngine {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityEngine for VaderEngine {
    fn name(&self) -> &'static str {
        "vader"
    }

    fn compound(&self, text: &str) -> Result<f64, ScoringFailure> {
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .ok_or(ScoringFailure::MissingCompound)
    }
}

/// Counts positive and negative words, with intensifiers (x1.5) and negation of the
/// previous one or two tokens flipping polarity.
pub struct WordListEngine {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    negations: HashSet<String>,
}

impl WordListEngine {
    pub fn new(words: &PolarityWords) -> Self {
        let set = |v: &[String]| v.iter().map(|w| w.to_lowercase()).collect::<HashSet<_>>();
        Self {
            positive: set(&words.positive),
            negative: set(&words.negative),
            intensifiers: set(&words.intensifiers),
            negations: set(&words.negations),
        }
    }
}

impl PolarityEngine for WordListEngine {
    fn name(&self) -> &'static str {
        "wordlist"
    }

    fn compound(&self, text: &str) -> Result<f64, ScoringFailure> {
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|s| !s.is_empty())
            .collect();

        let mut positive_score = 0.0;
        let mut negative_score = 0.0;

        for (i, word) in words.iter().enumerate() {
            let multiplier = if i > 0 && self.intensifiers.contains(words[i - 1]) {
                1.5
            } else {
                1.0
            };

            let is_negated = (i > 0 && self.negations.contains(words[i - 1]))
                || (i > 1 && self.negations.contains(words[i - 2]));

            if self.positive.contains(*word) {
                if is_negated {
                    negative_score += multiplier;
                } else {
                    positive_score += multiplier;
                }
            } else if self.negative.contains(*word) {
                if is_negated {
                    positive_score += multiplier;
                } else {
                    negative_score += multiplier;
                }
            }
        }

        let total = positive_score + negative_score;
        if total == 0.0 {
            return Ok(0.0);
        }
        Ok((positive_score - negative_score) / total)
    }
}

/// Produces a [0, 1] polarity score for raw text. Never fails: engine errors and panics
/// are logged and degrade to [`NEUTRAL_SCORE`].
pub struct PolarityScorer {
    engine: Box<dyn PolarityEngine>,
}

impl PolarityScorer {
    pub fn new(engine: Box<dyn PolarityEngine>) -> Self {
        Self { engine }
    }

    pub fn vader() -> Self {
        Self::new(Box::new(VaderEngine::new()))
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn score(&self, text: &str) -> f64 {
        match self.try_score(text) {
            Ok(score) => score,
            Err(e) => {
                warn!(engine = self.engine.name(), error = %e, "sentiment scoring failed, using neutral score");
                NEUTRAL_SCORE
            }
        }
    }

    pub fn try_score(&self, text: &str) -> Result<f64, ScoringFailure> {
        let cleaned = normalize(text);
        if cleaned.is_empty() {
            return Ok(NEUTRAL_SCORE);
        }

        let compound = panic::catch_unwind(AssertUnwindSafe(|| self.engine.compound(&cleaned)))
            .map_err(|payload| ScoringFailure::Panicked(panic_message(payload.as_ref())))??;

        if !compound.is_finite() {
            return Err(ScoringFailure::NonFinite(compound));
        }

        let score = ((compound + 1.0) / 2.0).clamp(0.0, 1.0);
        debug!(engine = self.engine.name(), compound, score, "scored text");
        Ok(score)
    }
}

impl Default for PolarityScorer {
    fn default() -> Self {
        Self::vader()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// True for a finite score inside [0, 1].
pub fn is_valid_score(score: f64) -> bool {
    (0.0..=1.0).contains(&score)
}

/// Buckets a [0, 1] score. Lower bounds are inclusive: 0.5 is positive, 0.3 is neutral.
pub fn classify(score: f64) -> SentimentClass {
    if score >= POSITIVE_THRESHOLD {
        SentimentClass::Positive
    } else if score >= NEUTRAL_THRESHOLD {
        SentimentClass::Neutral
    } else {
        SentimentClass::Negative
    }
}
