//! Ordered, named pattern → replacement rules

use crate::error::Result;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct CleaningRule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl CleaningRule {
    pub fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// Rules applied one after another, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CleaningRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<CleaningRule>) -> Self {
        Self { rules }
    }

    /// Build from `(name, pattern)` pairs whose matches are deleted.
    pub fn removals(patterns: &[(&'static str, &str)]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|&(name, pattern)| CleaningRule::new(name, pattern, ""))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[CleaningRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&CleaningRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}
