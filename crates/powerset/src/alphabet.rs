use std::collections::BTreeSet;
use std::fmt::{self, Display};

/// Transition label. `None` is an epsilon move, so epsilon can never be a
/// member of an [`Alphabet`].
pub type Label = Option<char>;

pub const EPSILON: Label = None;

/// Ordered set of input symbols.
///
/// Symbols are kept sorted, which gives every symbol a stable column in the
/// dense DFA transition table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Alphabet {
        let symbols: BTreeSet<char> = symbols.into_iter().collect();
        Alphabet {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.position(symbol).is_some()
    }

    pub(crate) fn position(&self, symbol: char) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.symbols
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Alphabet::new(iter)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", symbol)?;
        }
        write!(f, "}}")
    }
}

pub(crate) fn label_to_string(label: Label) -> String {
    match label {
        Some(symbol) => symbol.to_string(),
        None => "ε".to_string(),
    }
}
