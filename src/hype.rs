// "Hype vs reality": marketing claims in a product description checked against what
// reviewers actually say.
//
// Claims are detected by literal phrase containment in the normalized description.
// Evidence is literal too: a review mentioning the claim confirms it when the review
// scores positive and denies it otherwise, and every `"{negator} {claim}"` substring
// counts as one more denial regardless of the review's score. Phrasings such as
// "not the best" do not match the `"not best"` pattern.
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::{HypeReport, MarketingClaim, Review};
use crate::nlp::normalize;
use crate::nlp::sentiment::{PolarityScorer, POSITIVE_THRESHOLD};

/// Tokens captured on each side of a claim in the description.
pub const CLAIM_CONTEXT_TOKENS: usize = 5;

/// A review as seen by the claim checker. Reviews without a score are scored on demand.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub text: &'a str,
    pub score: Option<f64>,
}

impl<'a> Evidence<'a> {
    pub fn new(text: &'a str, score: Option<f64>) -> Self {
        Self { text, score }
    }
}

impl<'a> From<&'a Review> for Evidence<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            text: &review.text,
            score: review.sentiment_score,
        }
    }
}

pub struct HypeAnalyzer<'a> {
    lexicon: &'a Lexicon,
    scorer: &'a PolarityScorer,
}

impl<'a> HypeAnalyzer<'a> {
    pub fn new(lexicon: &'a Lexicon, scorer: &'a PolarityScorer) -> Self {
        Self { lexicon, scorer }
    }

    /// Marketing phrases found in the description, each with a token window around its
    /// first occurrence. Counts start at zero.
    pub fn extract_claims(&self, description: &str) -> Vec<MarketingClaim> {
        let text = normalize(description);
        if text.is_empty() {
            return Vec::new();
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();

        self.lexicon
            .marketing_phrases
            .iter()
            .filter(|phrase| !phrase.is_empty())
            .filter_map(|phrase| {
                let at = text.find(phrase.as_str())?;
                let first = token_index_at(&text, at);
                let span = phrase.split_whitespace().count().max(1);
                let start = first.saturating_sub(CLAIM_CONTEXT_TOKENS);
                let end = (first + span + CLAIM_CONTEXT_TOKENS).min(tokens.len());
                Some(MarketingClaim {
                    claim: phrase.clone(),
                    context: tokens[start..end].join(" "),
                    confirmations: 0,
                    denials: 0,
                })
            })
            .collect()
    }

    pub fn analyze(&self, description: &str, reviews: &[Evidence<'_>]) -> HypeReport {
        if description.trim().is_empty() || reviews.is_empty() {
            return HypeReport::default();
        }

        let mut claims = self.extract_claims(description);
        if claims.is_empty() {
            return HypeReport::default();
        }

        let corpus: Vec<(String, f64)> = reviews
            .iter()
            .map(|r| {
                let score = r.score.unwrap_or_else(|| self.scorer.score(r.text));
                (normalize(r.text), score)
            })
            .collect();

        for claim in claims.iter_mut() {
            self.gather_evidence(claim, &corpus);
        }

        let mut report = HypeReport::default();
        for claim in &claims {
            if claim.confirmations > 0 && claim.confirmations > claim.denials {
                report.matches.push(claim.clone());
            } else if claim.denials > 0 {
                report.contradictions.push(claim.clone());
            }
        }
        report.marketing_claims = claims;

        debug!(
            claims = report.marketing_claims.len(),
            matches = report.matches.len(),
            contradictions = report.contradictions.len(),
            "hype vs reality"
        );
        report
    }

    fn gather_evidence(&self, claim: &mut MarketingClaim, corpus: &[(String, f64)]) {
        let negated: Vec<String> = self
            .lexicon
            .claim_negators
            .iter()
            .map(|neg| format!("{} {}", neg, claim.claim))
            .collect();

        for (text, score) in corpus {
            if text.contains(claim.claim.as_str()) {
                if *score >= POSITIVE_THRESHOLD {
                    claim.confirmations += 1;
                } else {
                    claim.denials += 1;
                }
            }
            for pattern in &negated {
                if text.contains(pattern.as_str()) {
                    claim.denials += 1;
                }
            }
        }
    }
}

/// Index of the whitespace token containing byte offset `at`.
fn token_index_at(text: &str, at: usize) -> usize {
    let before = &text[..at];
    let complete = before.split_whitespace().count();
    if before.ends_with(|c: char| !c.is_whitespace()) {
        complete.saturating_sub(1)
    } else {
        complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer_parts() -> (Lexicon, PolarityScorer) {
        (Lexicon::builtin(), PolarityScorer::vader())
    }

    fn claim<'r>(report: &'r [MarketingClaim], name: &str) -> Option<&'r MarketingClaim> {
        report.iter().find(|c| c.claim == name)
    }

    #[test]
    fn test_extract_claims_with_context() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let claims = hype.extract_claims(
            "Meet the world's most comfortable chair, built with premium mesh for all-day support at work.",
        );
        let comfy = claim(&claims, "comfortable").unwrap();
        assert_eq!(comfy.context, "meet the world's most comfortable chair, built with premium mesh");
        let premium = claim(&claims, "premium").unwrap();
        assert_eq!(premium.context, "most comfortable chair, built with premium mesh for all-day support at");
        assert!(claims.iter().all(|c| c.confirmations == 0 && c.denials == 0));
    }

    #[test]
    fn test_multi_word_claim_context_spans_whole_phrase() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let claims = hype.extract_claims(
            "Setup is quick and this blender is easy to use even for kids at home",
        );
        let easy = claim(&claims, "easy to use").unwrap();
        // five tokens before "easy", the three claim tokens, then five after "use"
        assert_eq!(easy.context, "quick and this blender is easy to use even for kids at home");
    }

    #[test]
    fn test_override_phrases_match_any_case() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"marketing_phrases": ["Blazing Fast"]}"#)?;
        let lex = Lexicon::from_file(&path)?;
        let scorer = PolarityScorer::vader();

        let claims = HypeAnalyzer::new(&lex, &scorer).extract_claims("Blazing fast motor");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].claim, "blazing fast");
        Ok(())
    }

    #[test]
    fn test_claims_follow_lexicon_order() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let claims = hype.extract_claims("Powerful and premium. The best.");
        let names: Vec<&str> = claims.iter().map(|c| c.claim.as_str()).collect();
        assert_eq!(names, vec!["best", "premium", "powerful"]);
    }

    #[test]
    fn test_in_word_claim_context() {
        assert_eq!(token_index_at("a bestseller", 2), 1);
        assert_eq!(token_index_at("a bestseller", 6), 1);
        assert_eq!(token_index_at("best", 0), 0);
    }

    #[test]
    fn test_empty_inputs_yield_empty_report() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let reviews = [Evidence::new("the best", Some(0.9))];
        assert_eq!(hype.analyze("", &reviews), HypeReport::default());
        assert_eq!(hype.analyze("The best premium headphone", &[]), HypeReport::default());
    }

    #[test]
    fn test_not_the_best_is_denied_by_low_score_only() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let reviews = [Evidence::new("Not the best but works fine", Some(0.4))];
        let report = hype.analyze("This is the best premium headphone", &reviews);

        let best = claim(&report.marketing_claims, "best").unwrap();
        // "not best" never occurs literally, so the single denial comes from the
        // review mentioning "best" with a sub-positive score.
        assert_eq!(best.confirmations, 0);
        assert_eq!(best.denials, 1);
        assert!(claim(&report.contradictions, "best").is_some());

        let premium = claim(&report.marketing_claims, "premium").unwrap();
        assert_eq!((premium.confirmations, premium.denials), (0, 0));
        assert!(claim(&report.matches, "premium").is_none());
        assert!(claim(&report.contradictions, "premium").is_none());
    }

    #[test]
    fn test_literal_negation_always_denies() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let reviews = [Evidence::new("Sound is great, but it is not very comfortable.", Some(0.8))];
        let report = hype.analyze("A comfortable fit", &reviews);
        let comfy = claim(&report.marketing_claims, "comfortable").unwrap();
        assert_eq!(comfy.confirmations, 1);
        // only "not very comfortable" occurs; "not comfortable" does not
        assert_eq!(comfy.denials, 1);
        // tie: not a match, but denials > 0 so it is a contradiction
        assert!(report.matches.is_empty());
        assert_eq!(report.contradictions.len(), 1);
    }

    #[test]
    fn test_longer_negator_does_not_count_its_prefix() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);

        // "not really durable" matches the "not really" pattern but never "not durable"
        let reviews = [Evidence::new("Not really durable, it cracked.", Some(0.9))];
        let report = hype.analyze("Durable steel frame", &reviews);
        let durable = claim(&report.marketing_claims, "durable").unwrap();
        assert_eq!((durable.confirmations, durable.denials), (1, 1));

        // each distinct pattern present counts once
        let reviews = [Evidence::new("Not durable. Honestly, not really durable.", Some(0.9))];
        let report = hype.analyze("Durable steel frame", &reviews);
        let durable = claim(&report.marketing_claims, "durable").unwrap();
        assert_eq!((durable.confirmations, durable.denials), (1, 2));
    }

    #[test]
    fn test_match_takes_precedence_over_contradiction() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let reviews = [
            Evidence::new("Really durable, survived a drop.", Some(0.9)),
            Evidence::new("Durable and solid.", Some(0.8)),
            Evidence::new("Not durable at all.", Some(0.1)),
        ];
        let report = hype.analyze("Durable stainless steel blades", &reviews);
        let durable = claim(&report.marketing_claims, "durable").unwrap();
        assert_eq!(durable.confirmations, 2);
        // literal mention with low score, plus "not durable"
        assert_eq!(durable.denials, 2);
        assert!(claim(&report.contradictions, "durable").is_some());

        let reviews = [
            Evidence::new("Really durable, survived a drop.", Some(0.9)),
            Evidence::new("Durable and solid.", Some(0.8)),
            Evidence::new("Durable, though loud.", Some(0.45)),
        ];
        let report = hype.analyze("Durable stainless steel blades", &reviews);
        let durable = claim(&report.matches, "durable").unwrap();
        assert_eq!((durable.confirmations, durable.denials), (2, 1));
        assert!(claim(&report.contradictions, "durable").is_none());
    }

    #[test]
    fn test_unscored_reviews_are_scored() {
        let (lex, scorer) = analyzer_parts();
        let hype = HypeAnalyzer::new(&lex, &scorer);
        let reviews = [Evidence::new("The premium feel is wonderful, I love it!", None)];
        let report = hype.analyze("Premium leather", &reviews);
        let premium = claim(&report.matches, "premium").unwrap();
        assert_eq!(premium.confirmations, 1);
    }

    #[test]
    fn test_evidence_from_review() {
        let review = Review::new("a", "text").with_score(0.7);
        let ev = Evidence::from(&review);
        assert_eq!(ev.text, "text");
        assert_eq!(ev.score, Some(0.7));
    }
}
