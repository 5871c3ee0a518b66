// Review and product analysis pipeline.
//
// text → normalize → score → classify → keywords (per review), then aggregate and
// hype-vs-reality (per product). Every call recomputes from the reviews it is given;
// nothing here holds state besides the read-only scorer and lexicon.
use std::sync::Arc;

use tracing::{debug, warn};

use crate::aggregate::{aggregate_product, sentiment_distribution};
use crate::hype::{Evidence, HypeAnalyzer};
use crate::lexicon::Lexicon;
use crate::models::{
    HypeReport, Keyword, Product, ProductAnalysis, Review, SentimentClass, TextAnalysis,
};
use crate::nlp::sentiment::is_valid_score;
use crate::nlp::{classify, extract_keywords, PolarityScorer};

pub struct ReviewAnalyzer {
    scorer: PolarityScorer,
    lexicon: Arc<Lexicon>,
}

impl ReviewAnalyzer {
    pub fn new(scorer: PolarityScorer, lexicon: Arc<Lexicon>) -> Self {
        Self { scorer, lexicon }
    }

    pub fn scorer(&self) -> &PolarityScorer {
        &self.scorer
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn score(&self, text: &str) -> f64 {
        self.scorer.score(text)
    }

    pub fn extract_keywords(&self, text: &str, class: SentimentClass) -> Vec<Keyword> {
        extract_keywords(text, class, &self.lexicon)
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let sentiment_score = self.score(text);
        let sentiment_class = classify(sentiment_score);
        TextAnalysis {
            text: text.to_string(),
            sentiment_score,
            sentiment_class,
            keywords: self.extract_keywords(text, sentiment_class),
        }
    }

    /// Fills whatever scoring output the review is missing and repairs a class that
    /// disagrees with its score. A stored score outside [0, 1] counts as missing.
    /// Returns true if anything changed.
    pub fn score_review(&self, review: &mut Review) -> bool {
        let mut changed = false;

        if let Some(stored) = review.sentiment_score.filter(|s| !is_valid_score(*s)) {
            warn!(score = stored, "discarding out-of-range review score");
            review.sentiment_score = None;
            review.keywords.clear();
        }

        let score = match review.sentiment_score {
            Some(score) => score,
            None => {
                let score = self.score(&review.text);
                review.sentiment_score = Some(score);
                changed = true;
                score
            }
        };

        let class = classify(score);
        if review.sentiment_class != Some(class) {
            review.sentiment_class = Some(class);
            changed = true;
        }

        if review.keywords.is_empty() {
            let keywords = self.extract_keywords(&review.text, class);
            if !keywords.is_empty() {
                review.keywords = keywords;
                changed = true;
            }
        }

        changed
    }

    /// Discards previous results and scores the review again, e.g. after its text changed.
    pub fn rescore_review(&self, review: &mut Review) {
        review.sentiment_score = None;
        review.sentiment_class = None;
        review.keywords.clear();
        self.score_review(review);
    }

    pub fn hype_vs_reality(&self, description: &str, reviews: &[Review]) -> HypeReport {
        let evidence: Vec<Evidence<'_>> = reviews.iter().map(Evidence::from).collect();
        HypeAnalyzer::new(&self.lexicon, &self.scorer).analyze(description, &evidence)
    }

    pub fn analyze_product(&self, product: &Product) -> ProductAnalysis {
        let mut product = product.clone();
        for review in product.reviews.iter_mut() {
            self.score_review(review);
        }

        let aggregate = aggregate_product(&product.reviews);
        let hype_vs_reality = self.hype_vs_reality(&product.description, &product.reviews);

        debug!(
            product = product.id,
            reviews = product.reviews.len(),
            score = aggregate.score,
            "analyzed product"
        );

        ProductAnalysis {
            sentiment_distribution: sentiment_distribution(&aggregate.counts),
            sentiment_score: aggregate.score,
            sentiment_counts: aggregate.counts,
            key_aspects: aggregate.key_aspects,
            hype_vs_reality,
            product,
        }
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::new(PolarityScorer::vader(), Arc::new(Lexicon::builtin()))
    }
}
