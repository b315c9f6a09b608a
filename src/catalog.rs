//! Sandwich catalog: the sink parsed menus are written into.

use crate::model::Category;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedAddon {
    pub name: String,
    pub price_cents: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub ingredients: String,
    pub price_cents: u32,
    pub active: bool,
    pub addons: Vec<PricedAddon>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogItem {
    pub name: String,
    pub category: Category,
    pub ingredients: String,
    pub price_cents: u32,
    pub active: bool,
    pub addons: Vec<PricedAddon>,
}

/// Storage for catalog items. Each call is independent so callers can retry
/// or skip a single item without affecting the rest.
pub trait MenuStore: Send + Sync {
    fn list_items(&self) -> impl Future<Output = anyhow::Result<Vec<CatalogItem>>> + Send;

    fn insert(&self, item: NewCatalogItem)
    -> impl Future<Output = anyhow::Result<CatalogItem>> + Send;

    fn set_active(&self, id: u64, active: bool)
    -> impl Future<Output = anyhow::Result<()>> + Send;

    fn deactivate_all(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Finds an existing item whose name equals, contains or is contained in
/// `name`, ignoring case and surrounding whitespace.
pub fn find_fuzzy<'a>(items: &'a [CatalogItem], name: &str) -> Option<&'a CatalogItem> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    items.iter().find(|item| {
        let existing = item.name.trim().to_lowercase();
        !existing.is_empty()
            && (existing == wanted || existing.contains(&wanted) || wanted.contains(&existing))
    })
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    items: Vec<CatalogItem>,
}

/// In-process store shared between request handlers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("catalog store lock poisoned"))
    }
}

impl MenuStore for MemoryStore {
    async fn list_items(&self) -> anyhow::Result<Vec<CatalogItem>> {
        Ok(self.lock()?.items.clone())
    }

    async fn insert(&self, item: NewCatalogItem) -> anyhow::Result<CatalogItem> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let stored = CatalogItem {
            id: state.next_id,
            name: item.name,
            category: item.category,
            ingredients: item.ingredients,
            price_cents: item.price_cents,
            active: item.active,
            addons: item.addons,
            created_at: Utc::now(),
        };
        state.items.push(stored.clone());
        Ok(stored)
    }

    async fn set_active(&self, id: u64, active: bool) -> anyhow::Result<()> {
        let mut state = self.lock()?;
        let item = state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| anyhow!("no catalog item with id {id}"))?;
        item.active = active;
        Ok(())
    }

    async fn deactivate_all(&self) -> anyhow::Result<()> {
        let mut state = self.lock()?;
        for item in &mut state.items {
            item.active = false;
        }
        Ok(())
    }
}
