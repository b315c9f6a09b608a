//! The weekly menus the shop printed, as the OCR engine returned them.

use ebyyard_menu_api::{Category, ParsedMenuItem, parse_menu_text};
use rstest::rstest;

const H: Category = Category::Hoagie;
const F: Category = Category::Focaccia;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.txt", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

fn summary(items: &[ParsedMenuItem]) -> Vec<(&str, Category, Vec<&str>)> {
    items
        .iter()
        .map(|i| {
            (
                i.name.as_str(),
                i.category,
                i.addons.iter().map(String::as_str).collect(),
            )
        })
        .collect()
}

#[rstest]
#[case("wednesday", vec![
    ("Eby Cubano", H, vec![]),
    ("The Italian", H, vec!["Fresh Mozzarella"]),
    ("Torrid Turkey", H, vec![]),
    ("Eby Muffuletta", H, vec!["Chopped Calabrian Chilies"]),
    ("Beet Farinata", F, vec![]),
    ("Carne E Brie", F, vec![]),
    ("Autumn Smoked Salmon", F, vec![]),
    ("Eby Egg And Cheese", F, vec![]),
])]
#[case("thursday", vec![
    ("Carne Tonnata", H, vec!["Melted Provolone"]),
    ("Farmers' Market Green Goddess", H, vec!["Bacon"]),
    ("Hot Pastrami", H, vec![]),
    ("The Gobfather", H, vec![]),
    ("Brie Romaine", F, vec![]),
    ("Turkey Blt Chili Crisp", F, vec![]),
    ("The Beetnik", F, vec!["Turkey"]),
    ("Eby Egg And Cheese", F, vec![]),
])]
#[case("friday", vec![
    ("Porchetta", H, vec![]),
    ("Brass-ica Knuckles", H, vec![]),
    ("She's Gone Country", H, vec![]),
    ("The Italian", H, vec!["Fresh Mozzarella"]),
    ("Mortadella Club", F, vec![]),
    ("The Loaded Wagon", F, vec!["Turkey"]),
    ("Autumn Smoked Salmon", F, vec![]),
    ("Eby Egg And Cheese", F, vec![]),
])]
#[case("saturday", vec![
    ("Hot Pastrami", H, vec![]),
    ("Porchetta", H, vec![]),
    ("The Italian", H, vec!["Fresh Mozzarella"]),
    ("Farmers' Market Green Goddess", H, vec!["Bacon"]),
    ("California Club", H, vec![]),
    ("Beet Farinata", F, vec![]),
    ("Carne E Brie", F, vec![]),
    ("Autumn Smoked Salmon", F, vec![]),
    ("Eby Egg And Cheese", F, vec![]),
])]
#[case("sample", vec![
    ("The Italian", H, vec!["Fresh Mozzarella"]),
    ("Prosciutto And Calabrian Corn Melt", H, vec![]),
    ("California Club", H, vec![]),
    ("High Five", H, vec![]),
    ("Poblano Meatloaf Melt", F, vec![]),
    ("The Radiant Dynamo", F, vec![]),
    ("Bresola", F, vec![]),
    ("Eby Egg And Cheese", F, vec!["Bacon"]),
])]
fn weekly_menu(#[case] name: &str, #[case] expected: Vec<(&str, Category, Vec<&str>)>) {
    let items = parse_menu_text(&fixture(name));
    assert_eq!(summary(&items), expected);
}

#[test]
fn ingredients_are_joined_and_cleaned() {
    let items = parse_menu_text(&fixture("wednesday"));
    let ingredients = |name: &str| {
        items
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.ingredients.as_str())
            .unwrap()
    };

    assert_eq!(
        ingredients("Torrid Turkey"),
        "Turkey, Avocado, Aged Cheddar, Salsa Macha Mexican Chili Crisp, Onions, \
         Organic Greens, Roasted Jalapeno and Garlic Mayo"
    );
    assert_eq!(
        ingredients("Autumn Smoked Salmon"),
        "T&Js Smoked Salmon, Lemon Caper Labneh, Dill and Olive Oil Marinated Cherry Tomatoes, \
         Roasted Squash, Organic Greens"
    );
    assert_eq!(
        ingredients("Eby Egg And Cheese"),
        "Egg, Aged Cheddar, Organic Greens, Eby Chunky Chili Crisp, Garlic Aioli"
    );
}

#[test]
fn next_item_name_is_not_swallowed_as_ingredients() {
    let items = parse_menu_text(&fixture("thursday"));
    let brie = items.iter().find(|i| i.name == "Brie Romaine").unwrap();
    assert!(!brie.ingredients.contains("Turkey BLT"));
    let blt = items.iter().find(|i| i.name == "Turkey Blt Chili Crisp").unwrap();
    assert_eq!(
        blt.ingredients,
        "Turkey, Bacon, Roasted Tomatoes, Chili Crisp, Organic Green, Garlic Aioli"
    );
}

#[test]
fn parsing_is_deterministic() {
    for name in ["wednesday", "thursday", "friday", "saturday", "sample"] {
        let text = fixture(name);
        assert_eq!(parse_menu_text(&text), parse_menu_text(&text));
    }
}
