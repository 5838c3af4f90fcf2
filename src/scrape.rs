use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GenesysError, Result};
use crate::normalize::{decode_entities, normalize_display};

pub const GENESYS_URL: &str = "https://www.yugioh-card.com/en/genesys/";

/// One row of the Genesys points table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCard {
    pub card_name: String,
    pub points: i64,
}

/// Fetch the Genesys page and extract the ranked card list from it.
pub async fn fetch_ranked_list() -> Result<Vec<RankedCard>> {
    info!("Fetching Genesys points list from {}", GENESYS_URL);
    let body = reqwest::get(GENESYS_URL)
        .await
        .map_err(|e| GenesysError::RankedList(format!("request failed: {e}")))?
        .error_for_status()
        .map_err(|e| GenesysError::RankedList(format!("bad status: {e}")))?
        .text()
        .await
        .map_err(|e| GenesysError::RankedList(format!("could not read body: {e}")))?;
    parse_ranked_table(&body)
}

/// Pull `{card_name, points}` rows out of the first table on the page.
/// The header row is skipped. Rows with fewer than two cells, or whose
/// points cell is not an integer, are dropped rather than failing the run.
pub fn parse_ranked_table(html: &str) -> Result<Vec<RankedCard>> {
    let table = tag_inner(html, "table").ok_or(GenesysError::TableMissing)?;

    let mut cards = Vec::new();
    for row in tag_blocks(table, "tr").skip(1) {
        let cells: Vec<String> = tag_blocks(row, "td").map(cell_text).collect();
        if cells.len() < 2 {
            continue;
        }
        let points: i64 = match cells[1].trim().parse() {
            Ok(p) => p,
            Err(_) => {
                debug!("Skipping row with non-numeric points: {:?}", cells);
                continue;
            }
        };
        cards.push(RankedCard {
            card_name: normalize_display(&cells[0]),
            points,
        });
    }
    Ok(cards)
}

/// Inner content of the first `<tag ...>...</tag>` block, case-insensitive
/// on the tag name. Deliberately naive; the Genesys page is simple enough
/// that a real HTML tree is not worth carrying.
fn tag_inner<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    let lower = ascii_lower(html);
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let start = lower.find(&open)?;
    let after_open = html[start..].find('>')? + start + 1;
    let end = lower[after_open..].find(&close)? + after_open;
    Some(&html[after_open..end])
}

/// Iterator over the inner content of every `<tag ...>...</tag>` block.
fn tag_blocks<'a>(html: &'a str, tag: &str) -> impl Iterator<Item = &'a str> + 'a {
    let lower = ascii_lower(html);
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut pos = 0;
    std::iter::from_fn(move || {
        let start = lower[pos..].find(&open)? + pos;
        let after_open = html[start..].find('>')? + start + 1;
        let end = lower[after_open..].find(&close)? + after_open;
        pos = end + close.len();
        Some(&html[after_open..end])
    })
}

/// Visible text of a cell: tags stripped, entities decoded, whitespace
/// collapsed to single spaces.
fn cell_text(block: &str) -> String {
    let mut text = String::with_capacity(block.len());
    let mut in_tag = false;
    for ch in block.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// ASCII-only lowercasing, so byte offsets stay valid for slicing.
fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}
