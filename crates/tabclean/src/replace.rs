//! Ordered pattern replacement for cell values.
//!
//! A [`ReplacementMap`] holds (pattern, replacement) pairs that are applied
//! one after another in insertion order, each pair seeing the output of the
//! previous one. How a pattern matches depends on the [`MatchMode`]:
//!
//! - `Regex`: the pattern is a regular expression and every match inside a
//!   text value is replaced. `"A" => "B"` turns `"CAT"` into `"CBT"`.
//! - `Literal`: same as `Regex`, but the pattern is matched as plain text.
//! - `Exact`: the whole rendered value must equal the pattern. Numeric
//!   cells also match a numeric pattern of equal value, so `"5"` matches
//!   both `Int(5)` and `Float(5.0)`.
//!
//! In `Regex` and `Literal` modes only text cells are matched. A text
//! replacement is substituted in place (`$1` style group references work in
//! `Regex` mode). Any other replacement, including [`Value::Missing`],
//! replaces the whole cell when the pattern matches.

use indexmap::IndexMap;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// How replacement patterns are matched against cell values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Patterns are regular expressions matched anywhere in text cells.
    #[default]
    Regex,
    /// Patterns are plain substrings matched anywhere in text cells.
    Literal,
    /// Patterns must equal the whole rendered cell, or the cell's number.
    Exact,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    regex: Regex,
    number: Option<f64>,
    replacement: Value,
}

/// Ordered list of (pattern, replacement) pairs.
#[derive(Debug, Clone)]
pub struct ReplacementMap {
    mode: MatchMode,
    rules: Vec<Rule>,
}

impl ReplacementMap {
    /// Create an empty map.
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            rules: Vec::new(),
        }
    }

    /// Build a map from ordered pairs.
    pub fn from_pairs<P, V, I>(mode: MatchMode, pairs: I) -> Result<Self>
    where
        P: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (P, V)>,
    {
        let mut map = Self::new(mode);
        for (pattern, replacement) in pairs {
            map.insert(pattern, replacement)?;
        }
        Ok(map)
    }

    /// Build a map from an insertion-ordered map of text replacements.
    pub fn from_index_map(mode: MatchMode, mapping: &IndexMap<String, String>) -> Result<Self> {
        Self::from_pairs(
            mode,
            mapping.iter().map(|(from, to)| (from.clone(), to.clone())),
        )
    }

    /// Append a pair. Fails if the pattern is not a valid regular expression.
    pub fn insert(&mut self, pattern: impl Into<String>, replacement: impl Into<Value>) -> Result<()> {
        let pattern = pattern.into();
        let source = match self.mode {
            MatchMode::Regex => pattern.clone(),
            MatchMode::Literal => regex::escape(&pattern),
            MatchMode::Exact => format!("^(?:{})$", regex::escape(&pattern)),
        };
        let number = match self.mode {
            MatchMode::Exact => pattern.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        };
        self.rules.push(Rule {
            regex: Regex::new(&source)?,
            number,
            pattern,
            replacement: replacement.into(),
        });
        Ok(())
    }

    /// Matching mode for every pair in the map.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the map has no pairs.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Patterns and replacements in application order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.rules.iter().map(|r| (r.pattern.as_str(), &r.replacement))
    }

    /// Apply every pair in order to a single value.
    pub fn apply(&self, value: &Value) -> Value {
        let mut current = value.clone();
        for rule in &self.rules {
            current = self.apply_rule(rule, current);
        }
        current
    }

    fn apply_rule(&self, rule: &Rule, value: Value) -> Value {
        match self.mode {
            MatchMode::Regex | MatchMode::Literal => {
                let Value::Text(text) = &value else {
                    return value;
                };
                if !rule.regex.is_match(text) {
                    return value;
                }
                match &rule.replacement {
                    Value::Text(rep) if self.mode == MatchMode::Regex => {
                        Value::Text(rule.regex.replace_all(text, rep.as_str()).into_owned())
                    }
                    Value::Text(rep) => {
                        Value::Text(rule.regex.replace_all(text, NoExpand(rep.as_str())).into_owned())
                    }
                    other => other.clone(),
                }
            }
            MatchMode::Exact => {
                if value.is_missing() {
                    return value;
                }
                let numeric = matches!((value.as_f64(), rule.number), (Some(x), Some(n)) if x == n);
                if numeric || rule.regex.is_match(&value.to_string()) {
                    rule.replacement.clone()
                } else {
                    value
                }
            }
        }
    }
}

impl Default for ReplacementMap {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}
