// Batch repair of stored review data.
//
// Cleans review text (rescoring whatever changed), fills scoring output that was never
// written back, replaces out-of-range scores, fixes classes that disagree with their
// score, and resets out-of-range ratings. Products are independent, so the pass runs
// them in parallel against one shared, read-only analyzer.
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzer::ReviewAnalyzer;
use crate::models::{Product, Review};
use crate::nlp::clean_text;

pub const DEFAULT_RATING: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceReport {
    pub products_seen: usize,
    pub reviews_seen: usize,
    pub reviews_repaired: usize,
}

/// Repairs one review in place. Returns true if it was modified.
pub fn repair_review(analyzer: &ReviewAnalyzer, review: &mut Review) -> bool {
    let cleaned = clean_text(&review.text);
    let mut changed = if cleaned != review.text {
        debug!(author = %review.author, "review text cleaned, rescoring");
        review.text = cleaned;
        analyzer.rescore_review(review);
        true
    } else {
        analyzer.score_review(review)
    };

    let rating_ok = matches!(review.rating, Some(r) if (1.0..=5.0).contains(&r));
    if !rating_ok {
        review.rating = Some(DEFAULT_RATING);
        changed = true;
    }

    changed
}

/// Repairs every review of every product. `on_product` is called once per finished
/// product, from whichever worker thread handled it.
pub fn repair_catalog<F>(analyzer: &ReviewAnalyzer, products: &mut [Product], on_product: F) -> MaintenanceReport
where
    F: Fn(&Product) + Sync,
{
    let per_product: Vec<(usize, usize)> = products
        .par_iter_mut()
        .map(|product| {
            let repaired = product
                .reviews
                .iter_mut()
                .map(|review| repair_review(analyzer, review))
                .filter(|changed| *changed)
                .count();
            on_product(product);
            (product.reviews.len(), repaired)
        })
        .collect();

    let report = MaintenanceReport {
        products_seen: products.len(),
        reviews_seen: per_product.iter().map(|(seen, _)| seen).sum(),
        reviews_repaired: per_product.iter().map(|(_, repaired)| repaired).sum(),
    };

    info!(
        products = report.products_seen,
        reviews = report.reviews_seen,
        repaired = report.reviews_repaired,
        "maintenance pass finished"
    );
    report
}
