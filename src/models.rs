// Data model shared by scoring, aggregation, hype analysis and the CLI.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Neutral,
    Negative,
}

impl SentimentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentClass::Positive => "positive",
            SentimentClass::Neutral => "neutral",
            SentimentClass::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexicon phrase found in a review, tagged with its semantic category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: Option<f64>,
    /// `YYYY-MM-DD`; compared lexicographically.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub sentiment_class: Option<SentimentClass>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

impl Review {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, class: SentimentClass) {
        match class {
            SentimentClass::Positive => self.positive += 1,
            SentimentClass::Neutral => self.neutral += 1,
            SentimentClass::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Share of scored reviews in each class. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyAspects {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingClaim {
    pub claim: String,
    pub context: String,
    pub confirmations: u32,
    pub denials: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HypeReport {
    pub matches: Vec<MarketingClaim>,
    pub contradictions: Vec<MarketingClaim>,
    pub marketing_claims: Vec<MarketingClaim>,
}

impl HypeReport {
    pub fn is_empty(&self) -> bool {
        self.marketing_claims.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub score: f64,
    pub counts: SentimentCounts,
    pub key_aspects: KeyAspects,
}

/// Product with every derived field recomputed from its current reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAnalysis {
    #[serde(flatten)]
    pub product: Product,
    pub sentiment_score: f64,
    pub sentiment_counts: SentimentCounts,
    pub sentiment_distribution: SentimentDistribution,
    pub key_aspects: KeyAspects,
    pub hype_vs_reality: HypeReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub text: String,
    pub sentiment_score: f64,
    pub sentiment_class: SentimentClass,
    pub keywords: Vec<Keyword>,
}
