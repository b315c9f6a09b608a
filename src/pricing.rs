use crate::config::{ConfigError, PricingConfig};
use crate::model::ParsedMenuItem;
use regex::Regex;
use std::sync::LazyLock;

static DEFAULT_POLICY: LazyLock<PricingPolicy> = LazyLock::new(|| {
    PricingPolicy::new(&PricingConfig::default()).expect("default pricing keywords compile")
});

/// Compiled [`PricingConfig`].
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    vegetarian_price_cents: u32,
    standard_price_cents: u32,
    non_veg: Vec<Regex>,
    addon_surcharges: Vec<(Vec<String>, u32)>,
}

impl PricingPolicy {
    pub fn new(config: &PricingConfig) -> Result<Self, ConfigError> {
        let non_veg = config
            .non_veg_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .map(|keyword| {
                Regex::new(&format!(r"(?i)\b{keyword}\b")).map_err(|source| {
                    ConfigError::InvalidPattern {
                        field: "non-vegetarian keyword",
                        pattern: keyword.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let addon_surcharges = config
            .addon_surcharges
            .iter()
            .map(|s| {
                let matches = s.matches.iter().map(|m| m.to_lowercase()).collect();
                (matches, s.price_cents)
            })
            .collect();

        Ok(Self {
            vegetarian_price_cents: config.vegetarian_price_cents,
            standard_price_cents: config.standard_price_cents,
            non_veg,
            addon_surcharges,
        })
    }

    pub fn is_vegetarian(&self, item: &ParsedMenuItem) -> bool {
        !self
            .non_veg
            .iter()
            .any(|re| re.is_match(&item.name) || re.is_match(&item.ingredients))
    }

    pub fn default_price_cents(&self, item: &ParsedMenuItem) -> u32 {
        if self.is_vegetarian(item) {
            self.vegetarian_price_cents
        } else {
            self.standard_price_cents
        }
    }

    /// Surcharge for an add-on; unknown add-ons are free.
    pub fn addon_price_cents(&self, addon: &str) -> u32 {
        let lower = addon.to_lowercase();
        self.addon_surcharges
            .iter()
            .find(|(matches, _)| matches.iter().any(|m| !m.is_empty() && lower.contains(m.as_str())))
            .map(|(_, price)| *price)
            .unwrap_or(0)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        DEFAULT_POLICY.clone()
    }
}
