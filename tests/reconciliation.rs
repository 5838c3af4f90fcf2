use genesys_scraper::catalog::{CatalogCard, CatalogIndex};
use genesys_scraper::fuzzy_matcher::Reconciler;
use genesys_scraper::normalize::normalize_display;
use genesys_scraper::scrape::RankedCard;
use serde_json::json;

fn catalog(names: &[&str]) -> CatalogIndex {
    let cards = names
        .iter()
        .enumerate()
        .map(|(i, name)| CatalogCard {
            name: name.to_string(),
            payload: json!({ "id": i + 1, "name": name, "type": "Spell Card" }),
        })
        .collect();
    CatalogIndex::build(cards)
}

/// Build a ranked card the way the scraper would: display-normalized.
fn ranked(raw_name: &str, points: i64) -> RankedCard {
    RankedCard {
        card_name: normalize_display(raw_name),
        points,
    }
}

#[test]
fn end_to_end_batch_with_unmatched_card() {
    let index = catalog(&["Dark Magician", "Pot of Greed"]);
    let cards = vec![
        ranked("Dark Magician", 1),
        ranked("Pot of Greed ", 2),
        ranked("Totally Unknown Card", 3),
    ];

    let (enriched, report) = Reconciler::default().reconcile(&cards, &index);

    assert_eq!(enriched.len(), 2);
    assert_eq!(enriched[0].card_name, "Dark Magician");
    assert_eq!(enriched[0].points, 1);
    assert_eq!(enriched[0].card_info["id"], 1);
    assert_eq!(enriched[1].card_name, "Pot of Greed");
    assert_eq!(enriched[1].points, 2);
    assert_eq!(enriched[1].card_info["id"], 2);

    assert_eq!(report.exact_count(), 2);
    assert_eq!(report.fuzzy_count(), 0);
    assert_eq!(report.unmatched(), ["Totally Unknown Card"]);
}

#[test]
fn enriched_plus_unmatched_accounts_for_every_card() {
    let index = catalog(&["Dark Magician", "Pot of Greed", "Raigeki Break"]);
    let cards = vec![
        ranked("Dark Magician", 1),
        ranked("Raigeki Brake", 2),
        ranked("Totally Unknown Card", 3),
        ranked("Another Mystery", 4),
        ranked("pot of greed", 5),
    ];

    let (enriched, report) = Reconciler::default().reconcile(&cards, &index);

    assert_eq!(enriched.len() + report.unmatched_count(), cards.len());
    assert_eq!(enriched.len(), report.matched_count());
    assert_eq!(report.exact_count(), 2);
    assert_eq!(report.fuzzy_count(), 1);
    assert_eq!(report.unmatched_count(), 2);
}

#[test]
fn fuzzy_scenario_whitespace_exact_typo_approximate() {
    let index = catalog(&["Raigeki Break"]);
    let cards = vec![ranked("Raigeki  Break", 1), ranked("Raigeki Brake", 2)];

    let (enriched, report) = Reconciler::default().reconcile(&cards, &index);

    assert_eq!(enriched.len(), 2);
    assert_eq!(report.exact_count(), 1);
    assert_eq!(report.fuzzy_count(), 1);

    let (name, score) = &report.fuzzy()[0];
    assert_eq!(name, "Raigeki Brake");
    assert!(*score >= 90.0 && *score < 100.0, "score was {score}");
}

#[test]
fn output_order_follows_input_order() {
    let index = catalog(&["Alpha", "Beta", "Gamma"]);
    let cards = vec![ranked("Gamma", 3), ranked("Alpha", 1), ranked("Beta", 2)];

    let (enriched, _) = Reconciler::default().reconcile(&cards, &index);

    let names: Vec<&str> = enriched.iter().map(|c| c.card_name.as_str()).collect();
    assert_eq!(names, ["Gamma", "Alpha", "Beta"]);
}

#[test]
fn collisions_surface_in_the_report() {
    let index = catalog(&["Pot of Greed", "POT OF GREED"]);
    let cards = vec![ranked("Pot of Greed", 2)];

    let (enriched, report) = Reconciler::default().reconcile(&cards, &index);

    assert_eq!(report.catalog_collisions(), 1);
    // Last write wins: the later catalog entry is the one forwarded.
    assert_eq!(enriched[0].card_info["id"], 2);
}

#[test]
fn empty_display_names_never_match() {
    let index = catalog(&["Dark Magician"]);
    let cards = vec![ranked("   ", 1), ranked("Dark Magician", 2)];

    let (enriched, report) = Reconciler::default().reconcile(&cards, &index);

    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].points, 2);
    assert_eq!(report.unmatched(), [""]);
}
