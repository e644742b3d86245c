//! Allow/deny pattern registry deciding which channels are enabled.

use super::pattern::{NameMatcher, Pattern};
use super::spec::{FilterSpec, FilterToken};

/// Registry of compiled filter patterns.
///
/// Deny patterns are checked first and win over any allow pattern. With no
/// allow pattern at all, every name is disabled.
#[derive(Debug, Default, Clone)]
pub struct FilterRegistry {
    /// Patterns that enable a channel.
    names: Vec<Pattern>,

    /// Patterns that disable a channel.
    skips: Vec<Pattern>,

    /// The filter the current patterns were compiled from.
    spec: FilterSpec,
}

impl FilterRegistry {
    /// Create a new empty registry (everything disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a filter string.
    pub fn from_spec(spec: &str) -> Self {
        let mut registry = Self::new();
        registry.enable(spec);
        registry
    }

    /// Replace the active patterns with those of `spec`.
    pub fn enable(&mut self, spec: &str) {
        self.apply(FilterSpec::parse(spec));
    }

    /// Replace the active patterns with an already parsed spec.
    pub fn apply(&mut self, spec: FilterSpec) {
        let mut names = Vec::new();
        let mut skips = Vec::new();

        for token in spec.tokens() {
            match token {
                FilterToken::Allow(glob) => names.push(Pattern::lossy(glob)),
                FilterToken::Deny(glob) => skips.push(Pattern::lossy(glob)),
            }
        }

        log::debug!(
            "filter '{}': {} allow, {} deny",
            spec.raw(),
            names.len(),
            skips.len()
        );

        self.names = names;
        self.skips = skips;
        self.spec = spec;
    }

    /// Clear every pattern. Same as `enable("")`.
    pub fn disable(&mut self) {
        self.enable("");
    }

    /// Check if a channel name is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        if self.skips.iter().any(|p| p.matches(name)) {
            return false;
        }
        self.names.iter().any(|p| p.matches(name))
    }

    /// Compiled allow patterns.
    pub fn names(&self) -> &[Pattern] {
        &self.names
    }

    /// Compiled deny patterns.
    pub fn skips(&self) -> &[Pattern] {
        &self.skips
    }

    /// The filter currently in effect.
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }
}
