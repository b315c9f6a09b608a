//! Weekly menu import: parse the menu text and bring the catalog in line
//! with it.

use crate::catalog::{CatalogItem, MenuStore, NewCatalogItem, PricedAddon, find_fuzzy};
use crate::model::ParsedMenuItem;
use crate::parser::MenuParser;
use crate::pricing::PricingPolicy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("No sandwiches found in the menu. Please check the image quality.")]
    NoItemsFound,
    #[error("catalog store failed: {0}")]
    Store(#[source] anyhow::Error),
    #[error("failed to read menu: {0}")]
    Source(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub parsed: usize,
    pub processed: usize,
    pub activated: usize,
    pub created: usize,
    pub failed: usize,
}

enum Outcome {
    AlreadyActive,
    Activated,
    Created,
}

/// Replaces the active menu with the sandwiches found in `text`.
///
/// Every catalog item is deactivated first. Parsed sandwiches that fuzzy-match
/// an existing item reactivate it; the rest are created with a default price.
/// A failure on one sandwich is logged and counted, and the import carries on.
pub async fn import_menu_text<S: MenuStore>(
    store: &S,
    parser: &MenuParser,
    pricing: &PricingPolicy,
    text: &str,
) -> Result<ImportSummary, ImportError> {
    store.deactivate_all().await.map_err(ImportError::Store)?;

    let parsed = parser.parse(text);
    if parsed.is_empty() {
        return Err(ImportError::NoItemsFound);
    }
    info!(count = parsed.len(), "processing parsed sandwiches");

    let existing = store.list_items().await.map_err(ImportError::Store)?;
    let mut summary = ImportSummary {
        parsed: parsed.len(),
        ..ImportSummary::default()
    };

    for item in &parsed {
        match import_item(store, pricing, &existing, item).await {
            Ok(outcome) => {
                summary.processed += 1;
                match outcome {
                    Outcome::Activated => summary.activated += 1,
                    Outcome::Created => summary.created += 1,
                    Outcome::AlreadyActive => {}
                }
            }
            Err(err) => {
                summary.failed += 1;
                warn!(name = %item.name, error = %err, "failed to import sandwich");
            }
        }
    }

    info!(
        processed = summary.processed,
        activated = summary.activated,
        created = summary.created,
        failed = summary.failed,
        "menu import finished"
    );
    Ok(summary)
}

async fn import_item<S: MenuStore>(
    store: &S,
    pricing: &PricingPolicy,
    existing: &[CatalogItem],
    item: &ParsedMenuItem,
) -> anyhow::Result<Outcome> {
    if let Some(found) = find_fuzzy(existing, &item.name) {
        if found.active {
            return Ok(Outcome::AlreadyActive);
        }
        store.set_active(found.id, true).await?;
        return Ok(Outcome::Activated);
    }

    let addons = item
        .addons
        .iter()
        .map(|name| PricedAddon {
            name: name.clone(),
            price_cents: pricing.addon_price_cents(name),
        })
        .collect();

    store
        .insert(NewCatalogItem {
            name: item.name.clone(),
            category: item.category,
            ingredients: item.ingredients.clone(),
            price_cents: pricing.default_price_cents(item),
            active: true,
            addons,
        })
        .await?;
    Ok(Outcome::Created)
}
