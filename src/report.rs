use tracing::{info, warn};

/// Accumulated outcome of one reconciliation run.
///
/// Purely observational: nothing downstream branches on it. Per-card
/// diagnostics are logged as they happen; this is the structured record a
/// caller (or a test) can inspect after the batch.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    exact: usize,
    fuzzy: Vec<(String, f64)>,
    unmatched: Vec<String>,
    catalog_collisions: usize,
}

impl MatchReport {
    pub fn new(catalog_collisions: usize) -> Self {
        Self {
            catalog_collisions,
            ..Default::default()
        }
    }

    pub(crate) fn record_exact(&mut self) {
        self.exact += 1;
    }

    pub(crate) fn record_fuzzy(&mut self, card_name: &str, score: f64) {
        self.fuzzy.push((card_name.to_string(), score));
    }

    pub(crate) fn record_unmatched(&mut self, card_name: &str) {
        self.unmatched.push(card_name.to_string());
    }

    pub fn exact_count(&self) -> usize {
        self.exact
    }

    pub fn fuzzy_count(&self) -> usize {
        self.fuzzy.len()
    }

    pub fn unmatched_count(&self) -> usize {
        self.unmatched.len()
    }

    pub fn matched_count(&self) -> usize {
        self.exact + self.fuzzy.len()
    }

    /// `(card name, similarity score)` for every fuzzy match, in input order.
    pub fn fuzzy(&self) -> &[(String, f64)] {
        &self.fuzzy
    }

    /// Card names that found no catalog match, in input order.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Normalized-name collisions observed while the index was built.
    pub fn catalog_collisions(&self) -> usize {
        self.catalog_collisions
    }

    /// Log the run totals.
    pub fn log_summary(&self) {
        info!(
            "Matched {} cards ({} exact, {} fuzzy), {} unmatched",
            self.matched_count(),
            self.exact,
            self.fuzzy.len(),
            self.unmatched.len()
        );
        if !self.unmatched.is_empty() {
            warn!("Unmatched card names: {:?}", self.unmatched);
        }
        if self.catalog_collisions > 0 {
            warn!(
                "{} catalog names collided after normalization (later entries kept)",
                self.catalog_collisions
            );
        }
    }
}
