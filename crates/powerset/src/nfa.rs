use std::collections::HashMap;
use std::fmt::{self, Display};

use powerset_util::make_type_idx;
use serde::{Serialize, Serializer};

use crate::alphabet::{label_to_string, Alphabet, Label};
use crate::error::NfaError;
use crate::state_set::StateSet;

// states are stored as indices into `nodes`, transitions point at indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaNode {
    pub(crate) name: String,
    pub(crate) transitions: Vec<(Label, NfaStateIdx)>,
}

make_type_idx!(pub NfaStateIdx, NfaNode);

/// Non-deterministic finite automaton with epsilon moves.
///
/// Built and validated through [`NfaBuilder`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) nodes: Vec<NfaNode>,
    pub(crate) alphabet: Alphabet,
    pub(crate) initial_state: NfaStateIdx,
    pub(crate) accept_states: StateSet,
}

impl Nfa {
    pub fn builder() -> NfaBuilder {
        NfaBuilder::new()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start_state(&self) -> NfaStateIdx {
        self.initial_state
    }

    pub fn accepting_states(&self) -> &StateSet {
        &self.accept_states
    }

    pub fn is_accepting(&self, state: NfaStateIdx) -> bool {
        self.accept_states.contains(state)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = (NfaStateIdx, &str)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NfaStateIdx::new(i), node.name.as_str()))
    }

    pub fn state_index(&self, name: &str) -> Option<NfaStateIdx> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NfaStateIdx::new)
    }

    pub fn state_name(&self, state: NfaStateIdx) -> &str {
        &self.nodes[state].name
    }

    /// Outgoing edges of `state`, epsilon edges labelled `None`.
    pub fn transitions_from(
        &self,
        state: NfaStateIdx,
    ) -> impl Iterator<Item = (Label, NfaStateIdx)> + '_ {
        self.nodes[state].transitions.iter().copied()
    }

    /// Renders a set of NFA states by name, e.g. `{q0, q1}`.
    pub fn set_label(&self, set: &StateSet) -> String {
        set.label(|state| self.state_name(state))
    }

    pub(crate) fn state_names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name.clone()).collect()
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all: StateSet = self.states().map(|(idx, _)| idx).collect();
        writeln!(f, "States: {}", self.set_label(&all))?;
        writeln!(f, "Alphabet: {}", self.alphabet)?;
        writeln!(f, "Transitions:")?;
        for node in &self.nodes {
            for (label, next) in &node.transitions {
                writeln!(
                    f,
                    "({}, {}) -> {}",
                    node.name,
                    label_to_string(*label),
                    self.state_name(*next)
                )?;
            }
        }
        writeln!(f, "Start state: {}", self.state_name(self.initial_state))?;
        write!(f, "Accepting states: {}", self.set_label(&self.accept_states))
    }
}

#[derive(Serialize)]
struct NfaView<'a> {
    states: Vec<&'a str>,
    alphabet: &'a [char],
    transitions: Vec<NfaTransitionView<'a>>,
    start_state: &'a str,
    accepting_states: Vec<&'a str>,
}

#[derive(Serialize)]
struct NfaTransitionView<'a> {
    from: &'a str,
    // null for epsilon
    symbol: Label,
    to: &'a str,
}

impl Serialize for Nfa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let transitions = self
            .nodes
            .iter()
            .flat_map(|node| {
                node.transitions.iter().map(move |(label, next)| NfaTransitionView {
                    from: node.name.as_str(),
                    symbol: *label,
                    to: self.state_name(*next),
                })
            })
            .collect();

        NfaView {
            states: self.states().map(|(_, name)| name).collect(),
            alphabet: self.alphabet.as_slice(),
            transitions,
            start_state: self.state_name(self.initial_state),
            accepting_states: self
                .accept_states
                .iter()
                .map(|state| self.state_name(state))
                .collect(),
        }
        .serialize(serializer)
    }
}

/// Collects states, alphabet and transitions by name, then checks that they
/// describe a well-formed NFA.
///
/// ```
/// use powerset::{NfaBuilder, EPSILON};
///
/// let nfa = NfaBuilder::new()
///     .states(["q0", "q1"])
///     .alphabet(['a'])
///     .transition("q0", EPSILON, ["q1"])
///     .transition("q1", Some('a'), ["q1"])
///     .start("q0")
///     .accepting(["q1"])
///     .build()
///     .unwrap();
/// assert_eq!(nfa.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NfaBuilder {
    states: Vec<String>,
    alphabet: Vec<char>,
    transitions: Vec<(String, Label, String)>,
    start: Option<String>,
    accepting: Vec<String>,
}

impl NfaBuilder {
    pub fn new() -> NfaBuilder {
        NfaBuilder::default()
    }

    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.push(name.into());
        self
    }

    pub fn states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn alphabet<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.alphabet.extend(symbols);
        self
    }

    /// Adds one edge from `from` to each of `to` on `label`.
    pub fn transition<I, S>(mut self, from: &str, label: Label, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for target in to {
            self.transitions
                .push((from.to_string(), label, target.into()));
        }
        self
    }

    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn accepting<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepting.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Nfa, NfaError> {
        let alphabet = Alphabet::new(self.alphabet);

        let mut nodes: Vec<NfaNode> = Vec::new();
        let mut by_name: HashMap<String, NfaStateIdx> = HashMap::new();
        for name in self.states {
            if by_name.contains_key(&name) {
                continue;
            }
            let node = NfaNode {
                name: name.clone(),
                transitions: Vec::new(),
            };
            let idx = NfaStateIdx::from_push(&mut nodes, node);
            by_name.insert(name, idx);
        }

        for (from, label, to) in self.transitions {
            let from_idx = *by_name
                .get(&from)
                .ok_or_else(|| NfaError::UndeclaredTransitionSource(from.clone()))?;
            if let Some(symbol) = label {
                if !alphabet.contains(symbol) {
                    return Err(NfaError::SymbolNotInAlphabet {
                        from,
                        symbol,
                        alphabet,
                    });
                }
            }
            let to_idx = match by_name.get(&to) {
                Some(idx) => *idx,
                None => return Err(NfaError::UndeclaredTransitionTarget { from, to }),
            };

            // destinations form a set
            let edges = &mut nodes[from_idx].transitions;
            if !edges.contains(&(label, to_idx)) {
                edges.push((label, to_idx));
            }
        }

        let start = self.start.ok_or(NfaError::MissingStartState)?;
        let initial_state = *by_name
            .get(&start)
            .ok_or(NfaError::UndeclaredStartState(start.clone()))?;

        let mut accept_states = StateSet::with_capacity(nodes.len());
        for name in self.accepting {
            match by_name.get(&name) {
                Some(idx) => {
                    accept_states.insert(*idx);
                }
                None => return Err(NfaError::UndeclaredAcceptingState(name)),
            }
        }

        Ok(Nfa {
            nodes,
            alphabet,
            initial_state,
            accept_states,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::EPSILON;

    fn reference() -> NfaBuilder {
        NfaBuilder::new()
            .states(["q0", "q1", "q2"])
            .alphabet(['0', '1'])
            .transition("q0", EPSILON, ["q1"])
            .transition("q1", Some('0'), ["q2"])
            .transition("q1", Some('1'), ["q1"])
            .transition("q2", Some('0'), ["q2"])
            .transition("q2", Some('1'), ["q2"])
            .start("q0")
            .accepting(["q2"])
    }

    #[test]
    fn builds_reference_automaton() {
        let nfa = reference().build().expect("reference NFA is well formed");

        assert_eq!(nfa.len(), 3);
        assert_eq!(nfa.state_name(nfa.start_state()), "q0");
        let q2 = nfa.state_index("q2").unwrap();
        assert!(nfa.is_accepting(q2));
        assert!(!nfa.is_accepting(nfa.start_state()));

        let q1 = nfa.state_index("q1").unwrap();
        let edges: Vec<_> = nfa.transitions_from(nfa.start_state()).collect();
        assert_eq!(edges, vec![(EPSILON, q1)]);
    }

    #[test]
    fn duplicate_names_and_edges_collapse() {
        let nfa = NfaBuilder::new()
            .states(["a", "b", "a"])
            .alphabet(['x'])
            .transition("a", Some('x'), ["b", "b"])
            .start("a")
            .build()
            .unwrap();

        assert_eq!(nfa.len(), 2);
        assert_eq!(nfa.transitions_from(nfa.start_state()).count(), 1);
    }

    #[test]
    fn rejects_missing_start() {
        let result = NfaBuilder::new().state("q0").build();
        assert_eq!(result, Err(NfaError::MissingStartState));
    }

    #[test]
    fn rejects_undeclared_start() {
        let result = NfaBuilder::new().state("q0").start("q9").build();
        assert_eq!(result, Err(NfaError::UndeclaredStartState("q9".to_string())));
    }

    #[test]
    fn rejects_undeclared_accepting() {
        let result = reference().accepting(["q7"]).build();
        assert_eq!(
            result,
            Err(NfaError::UndeclaredAcceptingState("q7".to_string()))
        );
    }

    #[test]
    fn rejects_undeclared_transition_states() {
        let result = reference().transition("q5", EPSILON, ["q0"]).build();
        assert_eq!(
            result,
            Err(NfaError::UndeclaredTransitionSource("q5".to_string()))
        );

        let result = reference().transition("q0", Some('1'), ["q5"]).build();
        assert_eq!(
            result,
            Err(NfaError::UndeclaredTransitionTarget {
                from: "q0".to_string(),
                to: "q5".to_string()
            })
        );
    }

    #[test]
    fn rejects_symbol_outside_alphabet() {
        let result = reference().transition("q0", Some('2'), ["q1"]).build();
        assert_eq!(
            result,
            Err(NfaError::SymbolNotInAlphabet {
                from: "q0".to_string(),
                symbol: '2',
                alphabet: Alphabet::new(['0', '1']),
            })
        );
    }

    #[test]
    fn display_lists_every_edge() {
        let nfa = reference().build().unwrap();
        let text = nfa.to_string();

        assert!(text.starts_with("States: {q0, q1, q2}\nAlphabet: {0, 1}\n"));
        assert!(text.contains("(q0, ε) -> q1\n"));
        assert!(text.contains("(q2, 1) -> q2\n"));
        assert!(text.ends_with("Start state: q0\nAccepting states: {q2}"));
    }
}
