use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};

use bit_set::BitSet;

use crate::nfa::NfaStateIdx;

/// A set of NFA states, and the key of a DFA state during subset construction.
///
/// Comparison and hashing only look at the members, so two sets built in a
/// different order or with a different capacity are the same DFA state.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: BitSet,
}

impl StateSet {
    pub fn new() -> StateSet {
        StateSet { bits: BitSet::new() }
    }

    pub fn with_capacity(capacity: usize) -> StateSet {
        StateSet {
            bits: BitSet::with_capacity(capacity),
        }
    }

    pub fn singleton(state: NfaStateIdx) -> StateSet {
        let mut set = StateSet::new();
        set.insert(state);
        set
    }

    /// Returns `true` if the state was not already present.
    pub fn insert(&mut self, state: NfaStateIdx) -> bool {
        self.bits.insert(state.index())
    }

    pub fn contains(&self, state: NfaStateIdx) -> bool {
        self.bits.contains(state.index())
    }

    pub fn union_with(&mut self, other: &StateSet) {
        self.bits.union_with(&other.bits);
    }

    pub fn is_disjoint(&self, other: &StateSet) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Members in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = NfaStateIdx> + '_ {
        self.bits.iter().map(NfaStateIdx::new)
    }

    pub(crate) fn label<'a, F>(&self, name: F) -> String
    where
        F: Fn(NfaStateIdx) -> &'a str,
    {
        let names: Vec<&str> = self.iter().map(name).collect();
        format!("{{{}}}", names.join(", "))
    }
}

impl FromIterator<NfaStateIdx> for StateSet {
    fn from_iter<I: IntoIterator<Item = NfaStateIdx>>(iter: I) -> Self {
        let mut set = StateSet::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.iter().eq(other.bits.iter())
    }
}

impl Eq for StateSet {}

impl PartialOrd for StateSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StateSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits.iter().cmp(other.bits.iter())
    }
}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for member in self.bits.iter() {
            member.hash(state);
        }
        // length terminates the sequence so {0} and {0, 1} can't share a prefix hash
        self.bits.len().hash(state);
    }
}

impl Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.iter()).finish()
    }
}
