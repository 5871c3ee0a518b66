// Keyword extraction against the fixed phrase dictionaries.
// This is a vocabulary matcher, not general NLP: paraphrased sentiment is missed.
use std::collections::HashSet;

use crate::lexicon::Lexicon;
use crate::models::{Keyword, SentimentClass};

/// Tokens captured on each side of a single-word match.
pub const CONTEXT_TOKENS: usize = 3;

/// Finds dictionary phrases for `class` in `text`, in dictionary order, deduplicated by
/// phrase. Single-word phrases that occur as a whole token carry a context window;
/// multi-word phrases and in-word matches do not. Neutral text yields nothing.
pub fn extract_keywords(text: &str, class: SentimentClass, lexicon: &Lexicon) -> Vec<Keyword> {
    let categories = lexicon.keywords_for(class);
    if categories.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let mut keywords = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for category in categories {
        for phrase in &category.phrases {
            let phrase = phrase.as_str();
            if phrase.is_empty() || !lowered.contains(phrase) || !seen.insert(phrase) {
                continue;
            }

            let context = if is_single_word(phrase) {
                token_position(&tokens, phrase).map(|pos| context_window(&tokens, pos))
            } else {
                None
            };

            keywords.push(Keyword {
                keyword: phrase.to_string(),
                category: category.name.clone(),
                context,
            });
        }
    }

    keywords
}

fn is_single_word(phrase: &str) -> bool {
    !phrase.contains(char::is_whitespace)
}

/// First token equal to `word` once surrounding punctuation is ignored.
fn token_position(tokens: &[&str], word: &str) -> Option<usize> {
    tokens.iter().position(|t| strip_punctuation(t) == word)
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn context_window(tokens: &[&str], pos: usize) -> String {
    let start = pos.saturating_sub(CONTEXT_TOKENS);
    let end = (pos + CONTEXT_TOKENS + 1).min(tokens.len());
    tokens[start..end].join(" ")
}
