// NLP module for reviewpulse
pub mod keywords;
pub mod normalize;
pub mod sentiment;

pub use keywords::extract_keywords;
pub use normalize::{clean_text, normalize};
pub use sentiment::{classify, PolarityEngine, PolarityScorer, ScoringFailure, VaderEngine, WordListEngine};
