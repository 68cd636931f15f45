use std::collections::{HashMap, VecDeque};

use crate::dfa::{Dfa, DfaNode, DfaStateIdx};
use crate::nfa::Nfa;
use crate::state_set::StateSet;
use crate::trace::{NoTrace, TraceEvent, TraceSink};

/// Builds the DFA equivalent to `nfa` using subset construction.
pub fn convert(nfa: &Nfa) -> Dfa {
    convert_traced(nfa, &mut NoTrace)
}

/// Same as [`convert`], reporting every step to `trace`.
///
/// DFA states are numbered in breadth-first discovery order starting with the
/// closure of the NFA start state at index 0. The empty set is kept as a
/// regular (dead) state so every state has an edge on every symbol.
pub fn convert_traced<T: TraceSink + ?Sized>(nfa: &Nfa, trace: &mut T) -> Dfa {
    let alphabet = nfa.alphabet().clone();
    let width = alphabet.len();

    let mut nodes: Vec<DfaNode> = Vec::new();
    // configuration -> id
    let mut subsets: HashMap<StateSet, DfaStateIdx> = HashMap::new();
    let mut work_queue: VecDeque<DfaStateIdx> = VecDeque::new();

    let initial_configuration = nfa.epsilon_closure(&StateSet::singleton(nfa.start_state()));
    let initial_state =
        DfaStateIdx::from_push(&mut nodes, DfaNode::new(initial_configuration.clone(), width));
    subsets.insert(initial_configuration, initial_state);
    work_queue.push_back(initial_state);
    trace.event(&TraceEvent::StartState {
        state: initial_state,
        set: &nodes[initial_state].set,
    });

    // states are marked seen as soon as they are queued, so each is expanded once
    while let Some(current) = work_queue.pop_front() {
        trace.event(&TraceEvent::ProcessingState {
            state: current,
            set: &nodes[current].set,
        });

        for (column, symbol) in alphabet.iter().enumerate() {
            trace.event(&TraceEvent::ProcessingSymbol {
                state: current,
                symbol,
            });

            let moved = nfa.symbol_move(&nodes[current].set, symbol);
            let configuration = nfa.epsilon_closure(&moved);

            let next = match subsets.get(&configuration) {
                Some(next) => *next,
                None => {
                    let next = DfaStateIdx::from_push(
                        &mut nodes,
                        DfaNode::new(configuration.clone(), width),
                    );
                    subsets.insert(configuration, next);
                    work_queue.push_back(next);
                    trace.event(&TraceEvent::StateDiscovered {
                        state: next,
                        set: &nodes[next].set,
                    });
                    next
                }
            };

            nodes[current].transitions[column] = Some(next);
            trace.event(&TraceEvent::TransitionRecorded {
                from: current,
                symbol,
                to: next,
            });
        }
    }

    let mut accepting = 0;
    for (i, node) in nodes.iter_mut().enumerate() {
        if !node.set.is_disjoint(nfa.accepting_states()) {
            node.accepting = true;
            accepting += 1;
            trace.event(&TraceEvent::StateAccepting {
                state: DfaStateIdx::new(i),
                set: &node.set,
            });
        }
    }

    trace.event(&TraceEvent::Finished {
        states: nodes.len(),
        accepting,
    });

    Dfa {
        nodes,
        alphabet,
        initial_state,
        nfa_state_names: nfa.state_names(),
    }
}
