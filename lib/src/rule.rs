//! Totalistic Life-like rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

use crate::error::Error;
use ca_rules::ParseLife;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A totalistic Life-like rule.
///
/// A dead cell with `n` living neighbors is born iff `n` is in the
/// birth set; a living cell with `n` living neighbors survives iff `n` is in
/// the survival set. Both sets are stored as bit masks indexed by `n`.
///
/// Rules containing `B0` are rejected: on an infinite plane they would turn
/// the whole background alive, which a set of alive cells cannot represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    birth: u16,
    survival: u16,
}

impl Rule {
    /// Conway's Game of Life, `B3/S23`.
    pub const fn conway() -> Self {
        Rule {
            birth: 1 << 3,
            survival: 1 << 2 | 1 << 3,
        }
    }

    /// Constructs a new rule from the `b` and `s` data.
    ///
    /// Numbers greater than 8 are ignored.
    pub fn new(b: Vec<u8>, s: Vec<u8>) -> Self {
        let mask = |v: Vec<u8>| -> u16 {
            v.into_iter()
                .filter(|&n| n <= 8)
                .fold(0, |acc, n| acc | 1 << n)
        };
        Rule {
            birth: mask(b),
            survival: mask(s),
        }
    }

    /// Whether the rule contains `B0`.
    #[inline]
    pub fn has_b0(&self) -> bool {
        self.birth & 1 != 0
    }

    /// Whether a cell with the given state and number of living neighbors
    /// is alive in the next generation.
    #[inline]
    pub fn next_state(&self, alive: bool, alive_neighbors: u8) -> bool {
        let set = if alive { self.survival } else { self.birth };
        set & 1 << alive_neighbors != 0
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::conway()
    }
}

impl ParseLife for Rule {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(b, s)
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: Rule = ParseLife::parse_rule(input).map_err(Error::ParseRuleError)?;
        if rule.has_b0() {
            Err(Error::B0Error)
        } else {
            Ok(rule)
        }
    }
}

/// Displays the rule in `B/S` notation.
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in (0..=8).filter(|n| self.birth & 1 << n != 0) {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in (0..=8).filter(|n| self.survival & 1 << n != 0) {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}
