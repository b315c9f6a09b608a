use crate::model::{Category, ParsedMenuItem};
use crate::parser::clean::finalize;

/// State threaded through one scan: the active category, the single item
/// being accumulated and everything already sealed.
#[derive(Debug, Default)]
pub struct ScanContext {
    category: Option<Category>,
    current: Option<ParsedMenuItem>,
    output: Vec<ParsedMenuItem>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn current(&self) -> Option<&ParsedMenuItem> {
        self.current.as_ref()
    }

    pub fn has_open_item(&self) -> bool {
        self.current.is_some()
    }

    pub fn sealed(&self) -> &[ParsedMenuItem] {
        &self.output
    }

    /// Switches category, sealing the open item first. Repeating the active
    /// category changes nothing. Returns whether a switch happened.
    pub fn enter_category(&mut self, category: Category) -> bool {
        if self.category == Some(category) {
            return false;
        }
        self.seal();
        self.category = Some(category);
        true
    }

    pub fn seal(&mut self) {
        if let Some(item) = self.current.take() {
            if !item.name.is_empty() {
                self.output.push(item);
            }
        }
    }

    /// Seals the open item and starts a new one under the active category.
    /// Does nothing before the first header.
    pub fn open_item(&mut self, name: String, ingredients: String) -> bool {
        let Some(category) = self.category else {
            return false;
        };
        self.seal();
        self.current = Some(ParsedMenuItem::new(name, category, ingredients));
        true
    }

    pub fn add_addon(&mut self, addon: String) -> bool {
        match self.current.as_mut() {
            Some(item) => item.add_addon(addon),
            None => false,
        }
    }

    pub fn append_ingredients(&mut self, line: &str) -> bool {
        match self.current.as_mut() {
            Some(item) => {
                item.append_ingredients(line);
                true
            }
            None => false,
        }
    }

    pub fn finish(mut self, min_name_len: usize) -> Vec<ParsedMenuItem> {
        self.seal();
        finalize(self.output, min_name_len)
    }
}
