//! Runtime configuration.
//!
//! Everything menu-specific lives here as data: the header vocabulary for each
//! category, the condiment words that veto an item name, and the pricing table
//! used when new sandwiches are created. Defaults match the weekly menus the
//! shop prints; another menu layout only needs a different TOML file.

use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "MENU_API_CONFIG";
pub const BIND_ENV: &str = "MENU_API_BIND";
pub const LOG_ENV: &str = "MENU_API_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field} pattern {pattern:?}: {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub log_level: String,
    pub parser: ParserConfig,
    pub pricing: PricingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            parser: ParserConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Loads the file named by `MENU_API_CONFIG` (defaults when unset) and
    /// applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with(&env)
    }

    pub fn load_with(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = match env.get(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };
        config.apply_env_overrides(env);
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self, env: &HashMap<String, String>) {
        if let Some(bind) = env.get(BIND_ENV).filter(|v| !v.is_empty()) {
            self.bind_addr = bind.clone();
        }
        if let Some(level) = env.get(LOG_ENV).filter(|v| !v.is_empty()) {
            self.log_level = level.clone();
        }
    }
}

/// Tunables and vocabulary for the menu-text parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines longer than this are treated as descriptions or disclaimers.
    pub max_line_len: usize,
    pub min_name_len: usize,
    pub max_name_len: usize,
    /// Condiment-only lines shorter than this are never item names.
    pub descriptor_max_len: usize,
    /// Ingredient lines pulled in right after an item name.
    pub max_lookahead: usize,
    /// Header rules, tried in order.
    pub categories: Vec<CategoryRule>,
    pub descriptor_words: Vec<String>,
    pub dish_words: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_len: 60,
            min_name_len: 3,
            max_name_len: 50,
            descriptor_max_len: 40,
            max_lookahead: 2,
            // Focaccia is checked first so "Focaccia Sandwiches" never trips
            // the shorter hoagie stem.
            categories: vec![
                CategoryRule {
                    category: Category::Focaccia,
                    keywords: strings(&["focaccia"]),
                    patterns: strings(&["focac[cl]ia"]),
                    stem: Some(StemRule {
                        stem: "focac".to_string(),
                        max_len: 25,
                        unless: strings(&["hoag"]),
                    }),
                    prefixes: strings(&["focaccia"]),
                },
                CategoryRule {
                    category: Category::Hoagie,
                    keywords: strings(&["hoagies"]),
                    patterns: strings(&["^hoag[1i]es$"]),
                    stem: Some(StemRule {
                        stem: "hoag".to_string(),
                        max_len: 15,
                        unless: strings(&["sandwich"]),
                    }),
                    prefixes: strings(&["hoagie"]),
                },
            ],
            descriptor_words: strings(&[
                "aioli",
                "mayo",
                "mayonnaise",
                "dressing",
                "sauce",
                "spread",
                "butter",
                "cream",
                "vinaigrette",
                "labneh",
                "salsa",
                "chutney",
                "relish",
            ]),
            dish_words: strings(&[
                "egg",
                "sandwich",
                "club",
                "melt",
                "tonnata",
                "pastrami",
                "italian",
                "cubano",
                "muffuletta",
                "porchetta",
                "gobfather",
                "beetnik",
                "farinata",
                "brie",
                "salmon",
                "wagon",
                "romaine",
            ]),
        }
    }
}

/// How a category header is recognized.
///
/// `keywords` and `patterns` are matched against the lower-cased line with
/// punctuation removed. Only `keywords` count as a header while an item is
/// pulling in its ingredient lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub stem: Option<StemRule>,
    /// Lower-case line starts that block a name from opening a new item when
    /// they follow it.
    #[serde(default)]
    pub prefixes: Vec<String>,
}

/// A short line containing `stem` and none of `unless`, for OCR-mangled headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StemRule {
    pub stem: String,
    pub max_len: usize,
    #[serde(default)]
    pub unless: Vec<String>,
}

/// Default pricing for sandwiches created from an imported menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub vegetarian_price_cents: u32,
    pub standard_price_cents: u32,
    /// Word-bounded, case-insensitive regex fragments.
    pub non_veg_keywords: Vec<String>,
    pub addon_surcharges: Vec<AddonSurcharge>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vegetarian_price_cents: 1599,
            standard_price_cents: 1799,
            non_veg_keywords: strings(&[
                "meat",
                "beef",
                "pork",
                "chicken",
                "turkey",
                "ham",
                "salami",
                "prosciutto",
                "pastrami",
                "bacon",
                "salmon",
                "tuna",
                "fish",
                "sopressata",
                "capicola",
                "coppa",
                "mortadella",
                "cotto",
                "braised",
                "roasted.*sausage",
                "sausage",
            ]),
            addon_surcharges: vec![
                AddonSurcharge {
                    matches: strings(&["bacon"]),
                    price_cents: 300,
                },
                AddonSurcharge {
                    matches: strings(&["mozzarella", "mozz"]),
                    price_cents: 200,
                },
                AddonSurcharge {
                    matches: strings(&["provolone", "prov"]),
                    price_cents: 200,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonSurcharge {
    /// Lower-case substrings of the add-on name.
    pub matches: Vec<String>,
    pub price_cents: u32,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
