pub mod api;
pub mod catalog;
pub mod config;
pub mod import;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pricing;
pub mod source;

pub use catalog::{CatalogItem, MemoryStore, MenuStore};
pub use config::{AppConfig, ConfigError, ParserConfig, PricingConfig};
pub use import::{ImportError, ImportSummary, import_menu_text};
pub use model::{Category, ParsedMenuItem};
pub use parser::{MenuParser, parse_menu_text};
pub use pricing::PricingPolicy;
