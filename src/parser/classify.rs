//! Line classification.
//!
//! Every rule that decides what a line *is* lives here, in precedence order.
//! The scan loop only acts on the returned [`LineRole`].

use crate::config::{CategoryRule, ConfigError, ParserConfig};
use crate::model::Category;
use crate::parser::clean::strip_punctuation;
use crate::parser::cursor::LineCursor;
use crate::parser::scan::ScanContext;
use regex::Regex;
use std::sync::LazyLock;

static PAGE_FRACTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+/\d+$").unwrap());
static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(monday|tuesday|wednesday|thursday|friday|saturday|sunday)$").unwrap()
});
static PAGE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^page\s+\d+").unwrap());
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$?\d+\.?\d*$").unwrap());
static NAME_EXCLUDED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(add|deluxe|option)").unwrap());
static ADDON_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)add|\+").unwrap());
// "Add X", "+Add X", "Deluxe option: Add X" all hit the first pattern.
static ADDON_RES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)add\s+(.+)").unwrap(),
        Regex::new(r"^\+(.+)").unwrap(),
    ]
});
static LEADING_ADD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^add\s+").unwrap());
static LEADING_OPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^option:\s*").unwrap());

/// One normalized input line with the derived forms the rules look at.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub text: &'a str,
    pub lower: String,
    /// Lower-cased with punctuation removed.
    pub clean: String,
    /// Length in characters.
    pub len: usize,
}

impl<'a> Line<'a> {
    pub fn new(text: &'a str) -> Self {
        let lower = text.to_lowercase();
        let clean = strip_punctuation(&lower);
        Self {
            text,
            len: text.chars().count(),
            lower,
            clean,
        }
    }

    fn starts_uppercase(&self) -> bool {
        self.text.starts_with(|c: char| c.is_ascii_uppercase())
    }

    fn has_comma(&self) -> bool {
        self.text.contains(',')
    }

    fn has_and(&self) -> bool {
        self.text.contains("and")
    }

    fn is_price(&self) -> bool {
        PRICE_RE.is_match(self.text)
    }
}

/// Trims every line and drops the blank ones.
pub fn normalize_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Line::new)
        .collect()
}

/// What a line contributes to the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    Header(Category),
    Noise,
    ItemName,
    Addon(String),
    IngredientLine,
    Unrecognized,
}

#[derive(Debug, Clone)]
struct HeaderRule {
    category: Category,
    keywords: Vec<String>,
    patterns: Vec<Regex>,
    stem: Option<Stem>,
    prefixes: Vec<String>,
}

#[derive(Debug, Clone)]
struct Stem {
    stem: String,
    max_len: usize,
    unless: Vec<String>,
}

impl HeaderRule {
    fn compile(rule: &CategoryRule) -> Result<Self, ConfigError> {
        let patterns = rule
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    field: "category",
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            category: rule.category,
            keywords: lowered(&rule.keywords),
            patterns,
            stem: rule
                .stem
                .as_ref()
                .filter(|s| !s.stem.is_empty())
                .map(|s| Stem {
                    stem: s.stem.to_lowercase(),
                    max_len: s.max_len,
                    unless: lowered(&s.unless),
                }),
            prefixes: lowered(&rule.prefixes),
        })
    }

    fn matches_keyword(&self, clean: &str) -> bool {
        self.keywords.iter().any(|k| clean.contains(k.as_str()))
    }

    fn matches(&self, line: &Line<'_>) -> bool {
        let clean = line.clean.as_str();
        self.matches_keyword(clean)
            || self.patterns.iter().any(|p| p.is_match(clean))
            || self.stem.as_ref().is_some_and(|s| {
                clean.contains(s.stem.as_str())
                    && clean.chars().count() < s.max_len
                    && !s.unless.iter().any(|u| clean.contains(u.as_str()))
            })
    }
}

/// Compiled form of [`ParserConfig`].
#[derive(Debug, Clone)]
pub struct Classifier {
    headers: Vec<HeaderRule>,
    descriptor: Option<Regex>,
    dish: Option<Regex>,
    max_line_len: usize,
    min_name_len: usize,
    max_name_len: usize,
    descriptor_max_len: usize,
    max_lookahead: usize,
}

impl Classifier {
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        let headers = config
            .categories
            .iter()
            .map(HeaderRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let descriptor = word_alternation(&config.descriptor_words)
            .map(|words| compile("descriptor", format!(r"(?i)^(.*\s+)?({words})(\s+.*)?$")))
            .transpose()?;
        let dish = word_alternation(&config.dish_words)
            .map(|words| compile("dish", format!(r"(?i)\b({words})\b")))
            .transpose()?;

        Ok(Self {
            headers,
            descriptor,
            dish,
            max_line_len: config.max_line_len,
            min_name_len: config.min_name_len,
            max_name_len: config.max_name_len,
            descriptor_max_len: config.descriptor_max_len,
            max_lookahead: config.max_lookahead,
        })
    }

    pub fn min_name_len(&self) -> usize {
        self.min_name_len
    }

    /// Decides the role of the cursor's current line.
    pub fn classify(&self, cursor: &LineCursor<'_, Line<'_>>, ctx: &ScanContext) -> LineRole {
        let Some(line) = cursor.current() else {
            return LineRole::Unrecognized;
        };

        if let Some(category) = self.header(line) {
            return LineRole::Header(category);
        }
        // Nothing counts until the first header.
        if ctx.category().is_none() {
            return LineRole::Unrecognized;
        }
        if self.is_noise(line) {
            return LineRole::Noise;
        }
        if !ctx.has_open_item() {
            return if self.opens_item(cursor) {
                LineRole::ItemName
            } else {
                LineRole::Unrecognized
            };
        }
        if self.reopens_item(cursor) {
            return LineRole::ItemName;
        }
        if let Some(addon) = addon_name(line) {
            return LineRole::Addon(addon);
        }
        if self.is_continuation(line) {
            return LineRole::IngredientLine;
        }
        LineRole::Unrecognized
    }

    pub fn header(&self, line: &Line<'_>) -> Option<Category> {
        self.headers
            .iter()
            .find(|rule| rule.matches(line))
            .map(|rule| rule.category)
    }

    /// Keyword-only header test used while pulling ingredient lines.
    pub fn is_strict_header(&self, line: &Line<'_>) -> bool {
        self.headers.iter().any(|rule| rule.matches_keyword(&line.clean))
    }

    fn starts_with_header_prefix(&self, line: &Line<'_>) -> bool {
        self.headers
            .iter()
            .flat_map(|rule| rule.prefixes.iter())
            .any(|prefix| line.lower.starts_with(prefix.as_str()))
    }

    pub fn is_noise(&self, line: &Line<'_>) -> bool {
        PAGE_FRACTION_RE.is_match(line.text)
            || WEEKDAY_RE.is_match(line.text)
            || PAGE_NUMBER_RE.is_match(line.text)
            || line.len > self.max_line_len
    }

    /// A short condiment line such as "Lemon Pepper Aioli" that names no dish.
    pub fn is_pure_descriptor(&self, line: &Line<'_>) -> bool {
        line.len < self.descriptor_max_len
            && self.descriptor.as_ref().is_some_and(|re| re.is_match(&line.lower))
            && !self.dish.as_ref().is_some_and(|re| re.is_match(&line.lower))
    }

    /// Shape test for an item name, independent of the following line.
    pub fn is_name_candidate(&self, line: &Line<'_>) -> bool {
        line.len >= self.min_name_len
            && line.len <= self.max_name_len
            && line.starts_uppercase()
            && !line.text.contains(':')
            && !line.text.starts_with(|c: char| c.is_ascii_digit())
            && !line.lower.contains("ingredient")
            && !line.lower.contains("contains")
            && !NAME_EXCLUDED_PREFIX_RE.is_match(&line.lower)
            && !self.is_pure_descriptor(line)
    }

    /// Check made while no item is open: a name followed by an ingredient
    /// list, or the last line.
    pub fn opens_item(&self, cursor: &LineCursor<'_, Line<'_>>) -> bool {
        let Some(line) = cursor.current() else {
            return false;
        };
        self.is_name_candidate(line)
            && (cursor.peek(1).is_some_and(follows_name) || cursor.is_last())
    }

    /// Check made while an item is open. The following line must also not
    /// start a category header.
    pub fn reopens_item(&self, cursor: &LineCursor<'_, Line<'_>>) -> bool {
        let Some(line) = cursor.current() else {
            return false;
        };
        self.is_name_candidate(line)
            && (cursor
                .peek(1)
                .is_some_and(|next| follows_name(next) && !self.starts_with_header_prefix(next))
                || cursor.is_last())
    }

    /// Ingredient lines directly after the current item name, at most
    /// `max_lookahead` of them.
    pub fn ingredient_lookahead<'c>(&self, cursor: &LineCursor<'c, Line<'_>>) -> Vec<&'c str> {
        let mut taken = Vec::new();
        while taken.len() < self.max_lookahead {
            let Some(next) = cursor.peek(taken.len() + 1) else {
                break;
            };
            if self.is_strict_header(next) || !is_ingredient_like(next) {
                break;
            }
            // Add-on lines are handled by the main scan.
            if ADDON_MARKER_RE.is_match(next.text) {
                break;
            }
            if self.is_next_item_name(next, cursor.peek(taken.len() + 2)) {
                break;
            }
            taken.push(next.text);
        }
        taken
    }

    /// A comma-free name candidate that is itself followed by ingredients.
    fn is_next_item_name(&self, line: &Line<'_>, following: Option<&Line<'_>>) -> bool {
        !line.has_comma() && self.is_name_candidate(line) && following.is_some_and(follows_name)
    }

    pub fn is_continuation(&self, line: &Line<'_>) -> bool {
        line.len > 10
            && !line.is_price()
            && (line.has_comma() || line.has_and() || line.len > 20)
            && !(line.starts_uppercase() && line.len < self.max_name_len)
    }
}

/// Extracts the add-on name from an "Add …" / "+…" line.
pub fn addon_name(line: &Line<'_>) -> Option<String> {
    let captured = ADDON_RES
        .iter()
        .find_map(|re| re.captures(line.text))
        .and_then(|caps| caps.get(1))?;

    let without_add = LEADING_ADD_RE.replace(captured.as_str().trim(), "");
    let name = LEADING_OPTION_RE.replace(&without_add, "").trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// An ingredient list can follow a name; an add-on line cannot.
fn follows_name(next: &Line<'_>) -> bool {
    (next.has_comma() || next.has_and() || next.len > 30) && !is_addon_line(next)
}

fn is_addon_line(line: &Line<'_>) -> bool {
    ADDON_RES.iter().any(|re| re.is_match(line.text))
}

fn is_ingredient_like(line: &Line<'_>) -> bool {
    line.has_comma() || line.has_and() || (line.len > 20 && !line.is_price())
}

fn lowered(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn word_alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w))
        .collect();
    (!escaped.is_empty()).then(|| escaped.join("|"))
}

fn compile(field: &'static str, pattern: String) -> Result<Regex, ConfigError> {
    Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
        field,
        pattern,
        source,
    })
}
