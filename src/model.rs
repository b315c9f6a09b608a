use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu section an item was listed under.
///
/// The set is closed: a deployment recognizes exactly the categories it has
/// header rules for, and items are never emitted without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Flatbread sandwiches ("Focaccia Sandwiches" header).
    Focaccia,
    /// Long-roll sandwiches ("Hoagies" header).
    Hoagie,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Focaccia => "Focaccia",
            Category::Hoagie => "Hoagie",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sandwich recovered from menu text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMenuItem {
    pub name: String,
    pub category: Category,
    pub ingredients: String,
    pub addons: Vec<String>,
}

impl ParsedMenuItem {
    pub fn new(name: String, category: Category, ingredients: String) -> Self {
        Self {
            name,
            category,
            ingredients,
            addons: Vec::new(),
        }
    }

    /// Records an add-on unless the exact same name is already listed.
    pub fn add_addon(&mut self, addon: String) -> bool {
        if addon.is_empty() || self.addons.contains(&addon) {
            return false;
        }
        self.addons.push(addon);
        true
    }

    pub fn append_ingredients(&mut self, line: &str) {
        if !self.ingredients.is_empty() {
            self.ingredients.push_str(", ");
        }
        self.ingredients.push_str(line);
    }
}
