use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{GenesysError, Result};
use crate::normalize::normalize_key;

pub const CARDINFO_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";

/// One canonical card from the card database. Only `name` is ever
/// interpreted; `payload` is the complete original JSON object (name
/// included) and is forwarded verbatim into the enriched output.
#[derive(Debug, Clone)]
pub struct CatalogCard {
    pub name: String,
    pub payload: Value,
}

#[derive(Deserialize)]
struct CardInfoResponse {
    data: Vec<Value>,
}

/// Fetch the full card catalog from the card database API. Entries without
/// a usable `name` field are dropped and counted; a missing `data` envelope
/// fails the run.
pub async fn fetch_catalog() -> Result<Vec<CatalogCard>> {
    info!("Fetching card catalog from {}", CARDINFO_URL);
    let response: CardInfoResponse = reqwest::get(CARDINFO_URL)
        .await
        .map_err(|e| GenesysError::Catalog(format!("request failed: {e}")))?
        .error_for_status()
        .map_err(|e| GenesysError::Catalog(format!("bad status: {e}")))?
        .json()
        .await
        .map_err(|e| GenesysError::Catalog(format!("malformed payload: {e}")))?;

    let total = response.data.len();
    let cards: Vec<CatalogCard> = response
        .data
        .into_iter()
        .filter_map(card_from_value)
        .collect();
    if cards.len() < total {
        warn!("Dropped {} catalog entries without a name", total - cards.len());
    }
    info!("Fetched {} cards from the catalog", cards.len());
    Ok(cards)
}

fn card_from_value(value: Value) -> Option<CatalogCard> {
    let name = value.get("name")?.as_str()?.to_string();
    Some(CatalogCard { name, payload: value })
}

/// Lookup structure over the canonical catalog, keyed by normalized name.
///
/// The mapping is last-write-wins on key collisions; `corpus` retains every
/// key in catalog order (duplicates included) and is the search space for
/// fuzzy matching. Built once per run, read-only afterwards.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    by_key: HashMap<String, CatalogCard>,
    corpus: Vec<String>,
    collisions: usize,
}

impl CatalogIndex {
    pub fn build(cards: Vec<CatalogCard>) -> Self {
        let mut index = CatalogIndex::default();
        for card in cards {
            let key = normalize_key(&card.name);
            if let Some(previous) = index.by_key.insert(key.clone(), card) {
                index.collisions += 1;
                debug!(
                    "Catalog key collision on {:?}; keeping the later entry",
                    previous.name
                );
            }
            index.corpus.push(key);
        }
        if index.collisions > 0 {
            warn!("{} catalog names collided after normalization", index.collisions);
        }
        index
    }

    pub fn lookup_exact(&self, key: &str) -> Option<&CatalogCard> {
        self.by_key.get(key)
    }

    /// All normalized keys in catalog order, duplicates retained.
    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    /// Number of normalized-name collisions observed while building.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
