//! The composite `seasons` field.
//!
//! Backed by an ordered set, so duplicates are unrepresentable and toggling
//! the same season twice always restores the original set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Season;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonSet(BTreeSet<Season>);

impl SeasonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, season: Season) -> bool {
        self.0.contains(&season)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Season> + '_ {
        self.0.iter().copied()
    }

    /// A new set with `season` removed if present, added otherwise.
    pub fn toggled(&self, season: Season) -> Self {
        let mut next = self.0.clone();
        if !next.remove(&season) {
            next.insert(season);
        }
        Self(next)
    }
}

impl FromIterator<Season> for SeasonSet {
    fn from_iter<I: IntoIterator<Item = Season>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Flip membership of `value` in `set`.
pub fn toggle(set: &SeasonSet, value: Season) -> SeasonSet {
    set.toggled(value)
}
