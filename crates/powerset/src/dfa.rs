use std::fmt::{self, Display};

use powerset_util::make_type_idx;
use serde::{Serialize, Serializer};

use crate::alphabet::Alphabet;
use crate::error::SimulateError;
use crate::nfa::Nfa;
use crate::state_set::StateSet;
use crate::subset;
use crate::trace::TraceSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaNode {
    pub(crate) set: StateSet,
    // one column per alphabet symbol, in alphabet order
    pub(crate) transitions: Vec<Option<DfaStateIdx>>,
    pub(crate) accepting: bool,
}

impl DfaNode {
    pub(crate) fn new(set: StateSet, width: usize) -> DfaNode {
        DfaNode {
            set,
            transitions: vec![None; width],
            accepting: false,
        }
    }
}

make_type_idx!(pub DfaStateIdx, DfaNode);

/// Deterministic automaton whose states are sets of NFA states.
///
/// Produced by subset construction (see [`Dfa::from_nfa`]). Holds its own
/// copy of the NFA state names and never refers back to the NFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) nodes: Vec<DfaNode>,
    pub(crate) alphabet: Alphabet,
    pub(crate) initial_state: DfaStateIdx,
    pub(crate) nfa_state_names: Vec<String>,
}

impl Dfa {
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        subset::convert(nfa)
    }

    pub fn from_nfa_traced<T: TraceSink + ?Sized>(nfa: &Nfa, trace: &mut T) -> Dfa {
        subset::convert_traced(nfa, trace)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start_state(&self) -> DfaStateIdx {
        self.initial_state
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = (DfaStateIdx, &StateSet)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (DfaStateIdx::new(i), &node.set))
    }

    /// The NFA states a DFA state stands for.
    pub fn state_set(&self, state: DfaStateIdx) -> &StateSet {
        &self.nodes[state].set
    }

    pub fn find_state(&self, set: &StateSet) -> Option<DfaStateIdx> {
        self.nodes
            .iter()
            .position(|node| node.set == *set)
            .map(DfaStateIdx::new)
    }

    pub fn is_accepting(&self, state: DfaStateIdx) -> bool {
        self.nodes[state].accepting
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = DfaStateIdx> + '_ {
        self.states()
            .map(|(idx, _)| idx)
            .filter(|idx| self.is_accepting(*idx))
    }

    /// `None` when `symbol` is outside the alphabet.
    pub fn transition(&self, state: DfaStateIdx, symbol: char) -> Option<DfaStateIdx> {
        let column = self.alphabet.position(symbol)?;
        self.nodes[state].transitions[column]
    }

    /// Every recorded edge as `(from, symbol, to)`.
    pub fn transitions(&self) -> impl Iterator<Item = (DfaStateIdx, char, DfaStateIdx)> + '_ {
        self.states().flat_map(move |(from, _)| {
            self.alphabet
                .iter()
                .zip(self.nodes[from].transitions.iter())
                .filter_map(move |(symbol, to)| to.map(|to| (from, symbol, to)))
        })
    }

    /// Renders a DFA state by its NFA state names, e.g. `{q0, q1}`.
    pub fn state_label(&self, state: DfaStateIdx) -> String {
        self.nodes[state]
            .set
            .label(|nfa_state| self.nfa_state_names[nfa_state.index()].as_str())
    }

    /// Consumes `input` and returns the state the DFA stops in.
    pub fn run(&self, input: &str) -> Result<DfaStateIdx, SimulateError> {
        let mut state = self.initial_state;

        for symbol in input.chars() {
            let column = self.alphabet.position(symbol).ok_or_else(|| {
                SimulateError::SymbolNotInAlphabet {
                    symbol,
                    alphabet: self.alphabet.clone(),
                }
            })?;
            state = self.nodes[state].transitions[column]
                .ok_or(SimulateError::MissingTransition { state, symbol })?;
        }

        Ok(state)
    }

    /// Whether the DFA accepts `input`.
    ///
    /// Fails with [`SimulateError::SymbolNotInAlphabet`] on the first
    /// character outside the alphabet, before the transition table is looked
    /// at.
    pub fn simulate(&self, input: &str) -> Result<bool, SimulateError> {
        let state = self.run(input)?;
        Ok(self.is_accepting(state))
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.states().map(|(idx, _)| self.state_label(idx)).collect();

        writeln!(f, "States: {{{}}}", labels.join(", "))?;
        writeln!(f, "Alphabet: {}", self.alphabet)?;
        writeln!(f, "Transitions:")?;
        for (from, symbol, to) in self.transitions() {
            writeln!(f, "({}, {}) -> {}", labels[from.index()], symbol, labels[to.index()])?;
        }
        writeln!(f, "Start state: {}", labels[self.initial_state.index()])?;
        let accepting: Vec<&str> = self
            .accepting_states()
            .map(|idx| labels[idx.index()].as_str())
            .collect();
        write!(f, "Accepting states: {{{}}}", accepting.join(", "))
    }
}

#[derive(Serialize)]
struct DfaView<'a> {
    states: Vec<String>,
    alphabet: &'a [char],
    transitions: Vec<DfaTransitionView>,
    start_state: String,
    accepting_states: Vec<String>,
}

#[derive(Serialize)]
struct DfaTransitionView {
    from: String,
    symbol: char,
    to: String,
}

impl Serialize for Dfa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DfaView {
            states: self.states().map(|(idx, _)| self.state_label(idx)).collect(),
            alphabet: self.alphabet.as_slice(),
            transitions: self
                .transitions()
                .map(|(from, symbol, to)| DfaTransitionView {
                    from: self.state_label(from),
                    symbol,
                    to: self.state_label(to),
                })
                .collect(),
            start_state: self.state_label(self.initial_state),
            accepting_states: self
                .accepting_states()
                .map(|idx| self.state_label(idx))
                .collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::NfaStateIdx;

    // a -> b on 'a', b -> a on 'b', no edge from b on 'a'
    fn hand_built() -> Dfa {
        let mut nodes = Vec::new();
        let a = DfaStateIdx::from_push(
            &mut nodes,
            DfaNode::new(StateSet::singleton(NfaStateIdx::new(0)), 2),
        );
        let b = DfaStateIdx::from_push(
            &mut nodes,
            DfaNode::new(StateSet::singleton(NfaStateIdx::new(1)), 2),
        );
        nodes[a].transitions[0] = Some(b);
        nodes[b].transitions[1] = Some(a);
        nodes[b].accepting = true;

        Dfa {
            nodes,
            alphabet: Alphabet::new(['a', 'b']),
            initial_state: a,
            nfa_state_names: vec!["s".to_string(), "t".to_string()],
        }
    }

    #[test]
    fn simulate_hand_built() {
        let dfa = hand_built();
        assert_eq!(dfa.simulate("a"), Ok(true));
        assert_eq!(dfa.simulate("aba"), Ok(true));
        assert_eq!(dfa.simulate(""), Ok(false));
    }

    #[test]
    fn missing_transition_is_distinct_from_bad_symbol() {
        let dfa = hand_built();
        let a = dfa.start_state();
        let b = dfa.transition(a, 'a').unwrap();

        assert_eq!(
            dfa.simulate("aa"),
            Err(SimulateError::MissingTransition { state: b, symbol: 'a' })
        );
        assert_eq!(
            dfa.simulate("c"),
            Err(SimulateError::SymbolNotInAlphabet {
                symbol: 'c',
                alphabet: Alphabet::new(['a', 'b']),
            })
        );
    }

    #[test]
    fn bad_symbol_reported_before_table_lookup() {
        // 'b' from the start state has no entry, but 'z' comes first
        let dfa = hand_built();
        assert!(matches!(
            dfa.simulate("zb"),
            Err(SimulateError::SymbolNotInAlphabet { symbol: 'z', .. })
        ));
    }

    #[test]
    fn accessors() {
        let dfa = hand_built();
        let a = dfa.start_state();

        assert_eq!(dfa.len(), 2);
        assert_eq!(dfa.state_label(a), "{s}");
        assert_eq!(dfa.transition(a, 'b'), None);
        assert_eq!(dfa.transition(a, 'q'), None);
        assert_eq!(dfa.transitions().count(), 2);
        assert_eq!(dfa.accepting_states().count(), 1);
        assert_eq!(dfa.find_state(&StateSet::singleton(NfaStateIdx::new(1))), dfa.transition(a, 'a'));
        assert_eq!(dfa.find_state(&StateSet::new()), None);
    }
}
