use serde::Serialize;
use serde_json::Value;
use strsim::{jaro_winkler, normalized_levenshtein};
use tracing::{info, warn};

use crate::catalog::CatalogIndex;
use crate::normalize::normalize_key;
use crate::report::MatchReport;
use crate::scrape::RankedCard;

/// How a ranked card resolved against the catalog. Approximate carries the
/// similarity score on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome {
    Exact,
    Approximate(f64),
    Unmatched,
}

/// A ranked card joined with its full catalog record.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedCard {
    pub card_name: String,
    pub points: i64,
    pub card_info: Value,
}

/// Resolves ranked cards against the catalog index: exact key match first,
/// then the best fuzzy candidate at or above the similarity threshold.
#[derive(Debug, Clone)]
pub struct Reconciler {
    /// Minimum similarity score (0-100) for a fuzzy match.
    pub threshold: f64,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self { threshold: 85.0 }
    }
}

impl Reconciler {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Similarity between two normalized keys on a 0-100 scale.
    ///
    /// Symmetric and deterministic: the larger of normalized edit distance
    /// and Jaro-Winkler, plus a small containment bonus when one key is a
    /// substring of the other.
    pub fn similarity(a: &str, b: &str) -> f64 {
        if a == b {
            return 100.0;
        }
        let edit = normalized_levenshtein(a, b);
        let jw = jaro_winkler(a, b);
        let mut score = edit.max(jw);
        if !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a)) {
            let len_diff = (a.len() as f64 - b.len() as f64).abs();
            let max_len = a.len().max(b.len()) as f64;
            score += (1.0 - len_diff / max_len) * 0.1;
        }
        score.min(1.0) * 100.0
    }

    /// Resolve a single ranked card. Returns the enriched card when a match
    /// exists, together with the outcome classification.
    pub fn resolve(
        &self,
        card: &RankedCard,
        index: &CatalogIndex,
    ) -> (Option<EnrichedCard>, MatchOutcome) {
        let key = normalize_key(&card.card_name);
        // An empty key can never be a meaningful match; similarity against
        // an empty string is degenerate, so skip the scorer entirely.
        if key.is_empty() {
            return (None, MatchOutcome::Unmatched);
        }

        if let Some(hit) = index.lookup_exact(&key) {
            return (
                Some(enrich(card, hit.payload.clone())),
                MatchOutcome::Exact,
            );
        }

        if let Some((candidate, score)) = self.best_candidate(&key, index) {
            if score >= self.threshold {
                // Corpus keys always exist in the map.
                if let Some(hit) = index.lookup_exact(candidate) {
                    return (
                        Some(enrich(card, hit.payload.clone())),
                        MatchOutcome::Approximate(score),
                    );
                }
            }
        }
        (None, MatchOutcome::Unmatched)
    }

    /// Run the whole batch in input order. Unmatched cards are dropped from
    /// the enriched output and recorded in the report instead.
    pub fn reconcile(
        &self,
        cards: &[RankedCard],
        index: &CatalogIndex,
    ) -> (Vec<EnrichedCard>, MatchReport) {
        let mut enriched = Vec::with_capacity(cards.len());
        let mut report = MatchReport::new(index.collisions());

        for card in cards {
            let (hit, outcome) = self.resolve(card, index);
            match outcome {
                MatchOutcome::Exact => report.record_exact(),
                MatchOutcome::Approximate(score) => {
                    info!(
                        "Fuzzy match: {:?} matched with {:.1}% similarity",
                        card.card_name, score
                    );
                    report.record_fuzzy(&card.card_name, score);
                }
                MatchOutcome::Unmatched => {
                    warn!("No match found for card: {}", card.card_name);
                    report.record_unmatched(&card.card_name);
                }
            }
            enriched.extend(hit);
        }
        (enriched, report)
    }

    /// Best fuzzy candidate for `key` across the whole corpus. Only a
    /// strictly higher score replaces the running best, so ties resolve to
    /// the first occurrence in catalog order.
    fn best_candidate<'a>(&self, key: &str, index: &'a CatalogIndex) -> Option<(&'a str, f64)> {
        let mut best: Option<(&'a str, f64)> = None;
        for candidate in index.corpus() {
            let score = Self::similarity(key, candidate);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }
        best
    }
}

fn enrich(card: &RankedCard, card_info: Value) -> EnrichedCard {
    EnrichedCard {
        card_name: card.card_name.clone(),
        points: card.points,
        card_info,
    }
}
