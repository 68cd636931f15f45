use crate::error::SimulateError;
use crate::nfa::Nfa;
use crate::state_set::StateSet;

impl Nfa {
    /// Smallest superset of `states` closed under epsilon moves.
    ///
    /// States are checked for membership before being pushed, so cycles of
    /// epsilon edges are visited once.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<_> = states.iter().collect();

        while let Some(state) = stack.pop() {
            for (label, next) in self.transitions_from(state) {
                if label.is_none() && closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Union of the destinations reachable from `states` by consuming `symbol`.
    pub fn symbol_move(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut result = StateSet::with_capacity(self.len());

        for state in states.iter() {
            for (label, next) in self.transitions_from(state) {
                if label == Some(symbol) {
                    result.insert(next);
                }
            }
        }

        result
    }

    /// Runs the NFA directly, tracking every state it could be in.
    pub fn simulate(&self, input: &str) -> Result<bool, SimulateError> {
        let mut current = self.epsilon_closure(&StateSet::singleton(self.initial_state));

        for symbol in input.chars() {
            if !self.alphabet.contains(symbol) {
                return Err(SimulateError::SymbolNotInAlphabet {
                    symbol,
                    alphabet: self.alphabet.clone(),
                });
            }
            current = self.epsilon_closure(&self.symbol_move(&current, symbol));
        }

        Ok(!current.is_disjoint(&self.accept_states))
    }
}

#[cfg(test)]
mod tests {
    use crate::alphabet::EPSILON;
    use crate::nfa::{Nfa, NfaBuilder};
    use crate::state_set::StateSet;

    // a -ε-> b -ε-> c -ε-> a, c -x-> d
    fn epsilon_cycle() -> Nfa {
        NfaBuilder::new()
            .states(["a", "b", "c", "d"])
            .alphabet(['x'])
            .transition("a", EPSILON, ["b"])
            .transition("b", EPSILON, ["c"])
            .transition("c", EPSILON, ["a"])
            .transition("c", Some('x'), ["d"])
            .start("a")
            .accepting(["d"])
            .build()
            .unwrap()
    }

    fn named(nfa: &Nfa, names: &[&str]) -> StateSet {
        names
            .iter()
            .map(|name| nfa.state_index(name).unwrap())
            .collect()
    }

    #[test]
    fn closure_terminates_on_cycles() {
        let nfa = epsilon_cycle();
        let closure = nfa.epsilon_closure(&named(&nfa, &["b"]));
        assert_eq!(closure, named(&nfa, &["a", "b", "c"]));
    }

    #[test]
    fn closure_is_monotone_and_idempotent() {
        let nfa = epsilon_cycle();
        let subsets: [&[&str]; 5] = [&[], &["a"], &["d"], &["b", "d"], &["a", "b", "c", "d"]];

        for names in subsets {
            let set = named(&nfa, names);
            let closure = nfa.epsilon_closure(&set);
            assert!(set.is_subset(&closure), "{:?} not within its closure", names);
            assert_eq!(nfa.epsilon_closure(&closure), closure);
        }
    }

    #[test]
    fn move_follows_only_the_exact_symbol() {
        let nfa = epsilon_cycle();

        // `a` only has an epsilon edge, so moving on 'x' goes nowhere
        assert!(nfa.symbol_move(&named(&nfa, &["a"]), 'x').is_empty());
        assert_eq!(
            nfa.symbol_move(&named(&nfa, &["a", "c"]), 'x'),
            named(&nfa, &["d"])
        );
        assert!(nfa.symbol_move(&StateSet::new(), 'x').is_empty());
    }

    #[test]
    fn nfa_simulation() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.simulate("x"), Ok(true));
        assert_eq!(nfa.simulate(""), Ok(false));
        assert_eq!(nfa.simulate("xx"), Ok(false));
        assert!(nfa.simulate("y").is_err());
    }
}
