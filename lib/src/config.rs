//! Repository configuration.

use crate::{error::Error, repository::InMemoryGenerationRepository, rule::Rule};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Repository configuration.
///
/// The repository will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// The rule string of the cellular automaton.
    ///
    /// Only totalistic Life-like rules without `B0` are supported.
    #[educe(Default(expression = "String::from(\"B3/S23\")"))]
    pub rule_string: String,

    /// Whether to store every generation computed on the way to a
    /// requested one.
    ///
    /// By default only the requested generation is stored.
    pub cache_intermediate: bool,
}

impl Config {
    /// Sets up the default configuration.
    pub fn new() -> Self {
        Config::default()
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets whether to store intermediate generations.
    pub fn set_cache_intermediate(mut self, cache_intermediate: bool) -> Self {
        self.cache_intermediate = cache_intermediate;
        self
    }

    /// Parses the rule string.
    pub fn rule(&self) -> Result<Rule, Error> {
        self.rule_string.parse()
    }

    /// Creates a new, empty repository from the configuration.
    /// Returns an error if the rule string is invalid.
    pub fn repository(&self) -> Result<InMemoryGenerationRepository, Error> {
        let rule = self.rule()?;
        Ok(InMemoryGenerationRepository::with_rule(rule)
            .set_cache_intermediate(self.cache_intermediate))
    }
}
