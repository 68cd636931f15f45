use thiserror::Error;

use crate::alphabet::Alphabet;
use crate::dfa::DfaStateIdx;

/// Malformed automaton, rejected when the NFA is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NfaError {
    #[error("no start state given")]
    MissingStartState,
    #[error("start state `{0}` is not a declared state")]
    UndeclaredStartState(String),
    #[error("accepting state `{0}` is not a declared state")]
    UndeclaredAcceptingState(String),
    #[error("transition leaves undeclared state `{0}`")]
    UndeclaredTransitionSource(String),
    #[error("transition from `{from}` enters undeclared state `{to}`")]
    UndeclaredTransitionTarget { from: String, to: String },
    #[error("transition from `{from}` uses symbol '{symbol}' which is not in alphabet {alphabet}")]
    SymbolNotInAlphabet {
        from: String,
        symbol: char,
        alphabet: Alphabet,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulateError {
    #[error("Symbol '{symbol}' not in alphabet {alphabet}")]
    SymbolNotInAlphabet { symbol: char, alphabet: Alphabet },
    // only reachable with a DFA that was not produced by subset construction
    #[error("DFA has no transition from state {state:?} on '{symbol}'")]
    MissingTransition { state: DfaStateIdx, symbol: char },
}
