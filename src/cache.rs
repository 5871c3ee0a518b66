// Memoized product aggregates keyed by a hash of the review set.
// A hit returns exactly what `aggregate_product` would compute for the same reviews.
// Library-side option for long-lived callers; the CLI runs once per invocation and
// always recomputes.
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

use crate::aggregate::aggregate_product;
use crate::models::{ProductAggregate, Review};

/// Hash of everything the aggregate depends on, in review order.
pub fn review_set_hash(reviews: &[Review]) -> u64 {
    let mut hasher = DefaultHasher::new();
    reviews.len().hash(&mut hasher);
    for review in reviews {
        review.text.hash(&mut hasher);
        review.date.hash(&mut hasher);
        review.sentiment_score.map(f64::to_bits).hash(&mut hasher);
        review.keywords.hash(&mut hasher);
    }
    hasher.finish()
}

#[derive(Default)]
pub struct AggregateCache {
    entries: RwLock<HashMap<u64, ProductAggregate>>,
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&self, reviews: &[Review]) -> ProductAggregate {
        let key = review_set_hash(reviews);
        if let Some(hit) = self.entries.read().get(&key) {
            return hit.clone();
        }
        let computed = aggregate_product(reviews);
        self.entries.write().insert(key, computed.clone());
        computed
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
