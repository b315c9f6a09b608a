//! Menu-text parser.
//!
//! Turns the line-oriented OCR text of a weekly sandwich menu into
//! [`ParsedMenuItem`]s. A single left-to-right scan classifies each line
//! (see [`classify`]), pulls up to two ingredient lines after every item name,
//! and seals the open item whenever a header, a new name or the end of input
//! is reached. Malformed input never fails; it just yields fewer items.

pub mod classify;
pub mod clean;
pub mod cursor;
pub mod scan;

use crate::config::{ConfigError, ParserConfig};
use crate::model::ParsedMenuItem;
use classify::{Classifier, LineRole, normalize_lines};
use clean::clean_name;
use cursor::LineCursor;
use scan::ScanContext;
use std::sync::LazyLock;
use tracing::{debug, info};

static DEFAULT_PARSER: LazyLock<MenuParser> = LazyLock::new(|| {
    MenuParser::new(&ParserConfig::default()).expect("default parser vocabulary compiles")
});

/// Parses with the built-in vocabulary.
pub fn parse_menu_text(text: &str) -> Vec<ParsedMenuItem> {
    DEFAULT_PARSER.parse(text)
}

#[derive(Debug, Clone)]
pub struct MenuParser {
    classifier: Classifier,
}

impl Default for MenuParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}

impl MenuParser {
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: Classifier::new(config)?,
        })
    }

    pub fn parse(&self, text: &str) -> Vec<ParsedMenuItem> {
        let lines = normalize_lines(text);
        debug!(lines = lines.len(), "parsing menu text");

        let mut cursor = LineCursor::new(&lines);
        let mut ctx = ScanContext::new();

        while let Some(line) = cursor.current() {
            match self.classifier.classify(&cursor, &ctx) {
                LineRole::Header(category) => {
                    if ctx.enter_category(category) {
                        debug!(line = line.text, %category, "found category header");
                    }
                    cursor.advance(1);
                }
                LineRole::ItemName => {
                    let ingredients = self.classifier.ingredient_lookahead(&cursor);
                    let consumed = ingredients.len();
                    let name = clean_name(line.text);
                    if let Some(previous) = ctx.current() {
                        debug!(previous = %previous.name, next = %name, "sealing item at new name");
                    }
                    debug!(%name, ingredient_lines = consumed, "found item");
                    ctx.open_item(name, ingredients.join(", "));
                    cursor.advance(1 + consumed);
                }
                LineRole::Addon(addon) => {
                    debug!(%addon, "found add-on");
                    ctx.add_addon(addon);
                    cursor.advance(1);
                }
                LineRole::IngredientLine => {
                    ctx.append_ingredients(line.text);
                    cursor.advance(1);
                }
                LineRole::Noise | LineRole::Unrecognized => cursor.advance(1),
            }
        }

        let items = ctx.finish(self.classifier.min_name_len());
        info!(items = items.len(), "parsed menu text");
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use rstest::rstest;

    const SCENARIO_A: &str = "Hoagies
The Italian
Salami, Provolone, Lettuce, Tomato
Deluxe option: Add Fresh Mozzarella
Focaccia Sandwiches
Eby Egg and Cheese
Egg, Cheddar, Organic Greens
+Add Bacon";

    #[test]
    fn parses_both_sections_with_addons() {
        let items = parse_menu_text(SCENARIO_A);
        assert_eq!(
            items,
            vec![
                ParsedMenuItem {
                    name: "The Italian".into(),
                    category: Category::Hoagie,
                    ingredients: "Salami, Provolone, Lettuce, Tomato".into(),
                    addons: vec!["Fresh Mozzarella".into()],
                },
                ParsedMenuItem {
                    name: "Eby Egg And Cheese".into(),
                    category: Category::Focaccia,
                    ingredients: "Egg, Cheddar, Organic Greens".into(),
                    addons: vec!["Bacon".into()],
                },
            ]
        );
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(parse_menu_text("").is_empty());
        assert!(parse_menu_text("   \n\n\t\n").is_empty());
    }

    #[test]
    fn header_alone_yields_nothing() {
        assert!(parse_menu_text("Hoagies").is_empty());
        assert!(parse_menu_text("\n  Focaccia Sandwiches  \n").is_empty());
    }

    #[test]
    fn name_without_ingredients_is_sealed_before_the_next_item() {
        let items = parse_menu_text(
            "Hoagies
Porchetta
Eby Egg and Cheese
Egg, Aged Cheddar, Organic Greens",
        );
        let summary: Vec<_> = items
            .iter()
            .map(|i| (i.name.as_str(), i.ingredients.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                ("Porchetta", ""),
                ("Eby Egg And Cheese", "Egg, Aged Cheddar, Organic Greens"),
            ]
        );
    }

    #[rstest]
    #[case(
        "Hoagies\nThe Italian\nSalami and Provolone\nDeluxe option: Add Fresh Mozzarella",
        "The Italian",
        "Salami and Provolone",
        "Fresh Mozzarella"
    )]
    #[case(
        "Hoagies\nEby Muffuletta\nMortadella and Spicy Salami\n+ Add Chopped Calabrian Chilies",
        "Eby Muffuletta",
        "Mortadella and Spicy Salami",
        "Chopped Calabrian Chilies"
    )]
    fn short_ingredient_line_before_an_addon_stays_with_its_item(
        #[case] text: &str,
        #[case] name: &str,
        #[case] ingredients: &str,
        #[case] addon: &str,
    ) {
        let items = parse_menu_text(text);
        assert_eq!(items.len(), 1, "{items:?}");
        assert_eq!(items[0].name, name);
        assert_eq!(items[0].ingredients, ingredients);
        assert_eq!(items[0].addons, vec![addon]);
    }

    #[test]
    fn name_length_limit_is_inclusive() {
        let fifty = format!("A{}", "a".repeat(49));
        let fifty_one = format!("A{}", "a".repeat(50));

        let accepted = parse_menu_text(&format!("Hoagies\n{fifty}\nsalami, provolone, lettuce"));
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, fifty);
        assert_eq!(accepted[0].ingredients, "salami, provolone, lettuce");

        let rejected =
            parse_menu_text(&format!("Hoagies\n{fifty_one}\nsalami, provolone, lettuce"));
        assert!(rejected.is_empty());
    }

    #[test]
    fn repeated_addons_are_kept_once() {
        let items = parse_menu_text(
            "Hoagies
Carne Tonnata
Thinly Sliced Beef, Tonnato Sauce
+Add Melted Provolone
+Add Melted Provolone
Add Bacon",
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].addons, vec!["Melted Provolone", "Bacon"]);
    }

    #[test]
    fn repeated_header_does_not_split_an_item() {
        let items = parse_menu_text(
            "Hoagies
The Gobfather
Turkey, Provolone, Fennel Salami
Hoagies
+Add Bacon",
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].addons, vec!["Bacon"]);
    }

    #[test]
    fn continuation_lines_extend_the_open_item() {
        let items = parse_menu_text(
            "Focaccia Sandwiches
Beet Farinata
Italian Chickpea Patty, Roasted Beets
Deluxe: Add Goat Cheese
pickled red onions and arugula",
        );
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].ingredients,
            "Italian Chickpea Patty, Roasted Beets, pickled red onions and arugula"
        );
        assert_eq!(items[0].addons, vec!["Goat Cheese"]);
    }

    #[test]
    fn custom_vocabulary_changes_headers() {
        let mut config = ParserConfig::default();
        config.categories[1].keywords = vec!["subs".into()];
        let parser = MenuParser::new(&config).unwrap();
        let items = parser.parse("Subs\nThe Italian\nSalami, Provolone");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, Category::Hoagie);
    }
}
