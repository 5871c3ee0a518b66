// Product-level roll-up of per-review scores.
//
// The aggregate is a recency- and length-weighted mean over the reviews that carry a
// score. Reviews are ranked newest first by their `YYYY-MM-DD` date string, compared
// lexicographically; undated reviews rank as the oldest. The weighting constants are
// fixed so that results stay reproducible across runs and deployments.
use std::cmp::Ordering;

use crate::models::{KeyAspects, ProductAggregate, Review, SentimentCounts, SentimentDistribution};
use crate::nlp::classify;
use crate::nlp::sentiment::NEUTRAL_SCORE;

pub const RECENCY_DECAY: f64 = 0.1;
pub const MIN_RECENCY_WEIGHT: f64 = 0.5;
pub const MIN_LENGTH_WEIGHT: f64 = 0.5;
pub const MAX_LENGTH_WEIGHT: f64 = 1.5;
/// Characters of review text that earn a length weight of 1.0.
pub const LENGTH_UNIT: f64 = 100.0;

/// Reviews at or above this score feed the positive key aspects.
pub const STRONG_POSITIVE: f64 = 0.7;
/// Reviews at or below this score feed the negative key aspects.
pub const STRONG_NEGATIVE: f64 = 0.3;

/// Weight for the review at `rank` (0 = newest). Never below 0.5.
pub fn recency_weight(rank: usize) -> f64 {
    (1.0 - rank as f64 * RECENCY_DECAY).max(MIN_RECENCY_WEIGHT)
}

/// Weight from review length in characters, clamped to [0.5, 1.5].
pub fn length_weight(text: &str) -> f64 {
    (text.chars().count() as f64 / LENGTH_UNIT).clamp(MIN_LENGTH_WEIGHT, MAX_LENGTH_WEIGHT)
}

/// Weighted mean of the scored reviews, or 0.5 when none carry a score.
pub fn weighted_score(reviews: &[Review]) -> f64 {
    let mut scored: Vec<(&Review, f64)> = reviews
        .iter()
        .filter_map(|r| r.sentiment_score.map(|s| (r, s)))
        .collect();

    if scored.is_empty() {
        return NEUTRAL_SCORE;
    }

    // Stable sort keeps input order among equal dates.
    scored.sort_by(|(a, _), (b, _)| newest_first(a, b));

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (rank, (review, score)) in scored.iter().enumerate() {
        let weight = recency_weight(rank) * length_weight(&review.text);
        weighted_sum += weight * score;
        total_weight += weight;
    }

    weighted_sum / total_weight
}

fn newest_first(a: &Review, b: &Review) -> Ordering {
    date_key(b).cmp(date_key(a))
}

fn date_key(review: &Review) -> &str {
    review.date.as_deref().unwrap_or("")
}

/// Class counts over the scored reviews; unscored reviews are skipped.
pub fn sentiment_counts(reviews: &[Review]) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for score in reviews.iter().filter_map(|r| r.sentiment_score) {
        counts.record(classify(score));
    }
    counts
}

/// Keyword phrases from strongly polarized reviews, in review order.
pub fn key_aspects(reviews: &[Review]) -> KeyAspects {
    let mut aspects = KeyAspects::default();
    for review in reviews {
        let Some(score) = review.sentiment_score else {
            continue;
        };
        let bucket = if score >= STRONG_POSITIVE {
            &mut aspects.positive
        } else if score <= STRONG_NEGATIVE {
            &mut aspects.negative
        } else {
            continue;
        };
        bucket.extend(review.keywords.iter().map(|k| k.keyword.clone()));
    }
    aspects
}

/// Share of each class among scored reviews. A product with no scored reviews is
/// reported as entirely neutral.
pub fn sentiment_distribution(counts: &SentimentCounts) -> SentimentDistribution {
    let total = counts.total();
    if total == 0 {
        return SentimentDistribution {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
        };
    }
    let total = total as f64;
    SentimentDistribution {
        positive: counts.positive as f64 / total,
        neutral: counts.neutral as f64 / total,
        negative: counts.negative as f64 / total,
    }
}

/// Recomputes every derived product field from the full review set.
pub fn aggregate_product(reviews: &[Review]) -> ProductAggregate {
    ProductAggregate {
        score: weighted_score(reviews),
        counts: sentiment_counts(reviews),
        key_aspects: key_aspects(reviews),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Keyword;

    fn scored(text: &str, score: f64, date: Option<&str>) -> Review {
        let mut review = Review::new("tester", text).with_score(score);
        review.date = date.map(String::from);
        review
    }

    fn keyword(phrase: &str) -> Keyword {
        Keyword {
            keyword: phrase.to_string(),
            category: "experience".to_string(),
            context: None,
        }
    }

    #[test]
    fn test_recency_weight_decay_and_floor() {
        assert_eq!(recency_weight(0), 1.0);
        assert!((recency_weight(1) - 0.9).abs() < 1e-12);
        assert!((recency_weight(4) - 0.6).abs() < 1e-12);
        assert_eq!(recency_weight(5), 0.5);
        assert_eq!(recency_weight(100), 0.5);
        for i in 0..50 {
            assert!(recency_weight(i + 1) <= recency_weight(i));
        }
    }

    #[test]
    fn test_length_weight_clamps() {
        assert_eq!(length_weight("x"), 0.5);
        assert_eq!(length_weight(""), 0.5);
        assert_eq!(length_weight(&"x".repeat(100)), 1.0);
        assert_eq!(length_weight(&"x".repeat(1000)), 1.5);
        assert!((length_weight(&"x".repeat(120)) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(length_weight(&"é".repeat(100)), 1.0);
    }

    #[test]
    fn test_no_reviews_is_neutral() {
        assert_eq!(weighted_score(&[]), 0.5);
        let unscored = vec![Review::new("a", "no score yet")];
        assert_eq!(weighted_score(&unscored), 0.5);
    }

    #[test]
    fn test_single_review_returns_its_score() {
        for date in [None, Some("2023-01-01")] {
            let reviews = vec![scored("short", 0.83, date)];
            assert!((weighted_score(&reviews) - 0.83).abs() < 1e-12);
        }
    }

    #[test]
    fn test_newer_reviews_weigh_more() {
        let text = "x".repeat(100);
        let reviews = vec![
            scored(&text, 0.0, Some("2023-01-01")),
            scored(&text, 1.0, Some("2023-06-01")),
        ];
        // newest (1.0) gets weight 1.0, older (0.0) gets 0.9
        let expected = 1.0 / 1.9;
        assert!((weighted_score(&reviews) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_undated_reviews_rank_oldest() {
        let text = "x".repeat(100);
        let reviews = vec![
            scored(&text, 0.0, None),
            scored(&text, 1.0, Some("2020-01-01")),
        ];
        let expected = 1.0 / 1.9;
        assert!((weighted_score(&reviews) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let reviews = vec![
            scored(&"a".repeat(100), 0.9, None),
            scored(&"b".repeat(100), 0.2, None),
            scored(&"c".repeat(100), 0.6, None),
        ];
        let expected = (1.0 * 0.9 + 0.9 * 0.2 + 0.8 * 0.6) / (1.0 + 0.9 + 0.8);
        assert!((weighted_score(&reviews) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unscored_reviews_are_excluded() {
        let reviews = vec![
            Review::new("a", "pending").with_date("2024-01-01"),
            scored("scored", 0.25, Some("2023-01-01")),
        ];
        assert!((weighted_score(&reviews) - 0.25).abs() < 1e-12);
        assert_eq!(sentiment_counts(&reviews).total(), 1);
    }

    #[test]
    fn test_end_to_end_counts_and_score() {
        let reviews = vec![
            scored("Love it", 0.9, None),
            scored("Broke on day two", 0.2, None),
            scored("Fine for the price", 0.6, None),
        ];
        let agg = aggregate_product(&reviews);
        assert_eq!(
            agg.counts,
            SentimentCounts {
                positive: 2,
                neutral: 0,
                negative: 1
            }
        );
        // all texts are short, so every length weight is 0.5
        let weights = [1.0 * 0.5, 0.9 * 0.5, 0.8 * 0.5];
        let expected = (weights[0] * 0.9 + weights[1] * 0.2 + weights[2] * 0.6)
            / weights.iter().sum::<f64>();
        assert!((agg.score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_distribution() {
        let empty = sentiment_distribution(&SentimentCounts::default());
        assert_eq!((empty.positive, empty.neutral, empty.negative), (0.0, 1.0, 0.0));

        let dist = sentiment_distribution(&SentimentCounts {
            positive: 2,
            neutral: 1,
            negative: 1,
        });
        assert_eq!(dist.positive, 0.5);
        assert_eq!(dist.neutral, 0.25);
        assert_eq!(dist.negative, 0.25);
    }

    #[test]
    fn test_key_aspects_use_strict_thresholds() {
        let mut strong_pos = scored("great", 0.7, None);
        strong_pos.keywords = vec![keyword("great"), keyword("love")];
        let mut mild_pos = scored("good", 0.69, None);
        mild_pos.keywords = vec![keyword("good")];
        let mut strong_neg = scored("bad", 0.3, None);
        strong_neg.keywords = vec![keyword("bad")];
        let mut mild_neg = scored("meh", 0.31, None);
        mild_neg.keywords = vec![keyword("poor")];

        let aspects = key_aspects(&[strong_pos, mild_pos, strong_neg, mild_neg]);
        assert_eq!(aspects.positive, vec!["great", "love"]);
        assert_eq!(aspects.negative, vec!["bad"]);
    }
}
