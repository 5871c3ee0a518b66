// Review sentiment scoring, product-level aggregation and marketing-claim checks.
pub mod aggregate;
pub mod analyzer;
pub mod cache;
pub mod config;
pub mod hype;
pub mod lexicon;
pub mod maintenance;
pub mod models;
pub mod nlp;
pub mod source;

pub use aggregate::aggregate_product;
pub use analyzer::ReviewAnalyzer;
pub use hype::{Evidence, HypeAnalyzer};
pub use lexicon::Lexicon;
pub use models::{
    HypeReport, Keyword, MarketingClaim, Product, ProductAggregate, ProductAnalysis, Review,
    SentimentClass, SentimentCounts,
};
pub use nlp::{classify, extract_keywords, normalize, PolarityScorer};
pub use source::{JsonStore, ProductSource, SampleCatalog};
