use std::io::{self, Write};

use crate::dfa::DfaStateIdx;
use crate::nfa::Nfa;
use crate::state_set::StateSet;

/// One step of subset construction, reported to a [`TraceSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent<'a> {
    StartState { state: DfaStateIdx, set: &'a StateSet },
    ProcessingState { state: DfaStateIdx, set: &'a StateSet },
    ProcessingSymbol { state: DfaStateIdx, symbol: char },
    StateDiscovered { state: DfaStateIdx, set: &'a StateSet },
    TransitionRecorded { from: DfaStateIdx, symbol: char, to: DfaStateIdx },
    StateAccepting { state: DfaStateIdx, set: &'a StateSet },
    Finished { states: usize, accepting: usize },
}

/// Observer for subset construction. Sinks only see the events, they can't
/// change the DFA being built.
pub trait TraceSink {
    fn event(&mut self, event: &TraceEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn event(&mut self, _event: &TraceEvent<'_>) {}
}

impl<F> TraceSink for F
where
    F: FnMut(&TraceEvent<'_>),
{
    fn event(&mut self, event: &TraceEvent<'_>) {
        self(event)
    }
}

/// Writes one line per event, naming states the way the NFA does.
///
/// The first write error stops output and is returned by [`WriterTrace::finish`].
pub struct WriterTrace<W: Write> {
    writer: W,
    nfa_names: Vec<String>,
    // DFA labels in discovery order, so transitions can be printed by name
    dfa_labels: Vec<String>,
    error: Option<io::Error>,
}

impl<W: Write> WriterTrace<W> {
    pub fn new(writer: W, nfa: &Nfa) -> WriterTrace<W> {
        WriterTrace {
            writer,
            nfa_names: nfa.state_names(),
            dfa_labels: Vec::new(),
            error: None,
        }
    }

    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writer),
        }
    }

    fn set_label(&self, set: &StateSet) -> String {
        set.label(|state| self.nfa_names[state.index()].as_str())
    }

    fn dfa_label(&self, state: DfaStateIdx) -> &str {
        self.dfa_labels
            .get(state.index())
            .map(String::as_str)
            .unwrap_or("?")
    }

    fn remember(&mut self, state: DfaStateIdx, set: &StateSet) {
        let label = self.set_label(set);
        if state.index() >= self.dfa_labels.len() {
            self.dfa_labels.resize(state.index() + 1, String::new());
        }
        self.dfa_labels[state.index()] = label;
    }

    fn render(&mut self, event: &TraceEvent<'_>) -> String {
        match *event {
            TraceEvent::StartState { state, set } => {
                self.remember(state, set);
                format!(
                    "Start state of DFA is epsilon closure of start state of NFA: {}",
                    self.dfa_label(state)
                )
            }
            TraceEvent::ProcessingState { state, .. } => {
                format!("Processing state: {}", self.dfa_label(state))
            }
            TraceEvent::ProcessingSymbol { symbol, .. } => {
                format!("Processing symbol: {}", symbol)
            }
            TraceEvent::StateDiscovered { state, set } => {
                self.remember(state, set);
                format!(
                    "State {} is not in DFA states, adding it...",
                    self.dfa_label(state)
                )
            }
            TraceEvent::TransitionRecorded { from, symbol, to } => format!(
                "Transition: {} --{}--> {}",
                self.dfa_label(from),
                symbol,
                self.dfa_label(to)
            ),
            TraceEvent::StateAccepting { state, .. } => format!(
                "State {} contains an accepting state of NFA, adding it to DFA accepting states...",
                self.dfa_label(state)
            ),
            TraceEvent::Finished { states, accepting } => {
                format!("Final DFA has {} states, {} accepting", states, accepting)
            }
        }
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn event(&mut self, event: &TraceEvent<'_>) {
        let line = self.render(event);
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.writer, "{}", line) {
            self.error = Some(err);
        }
    }
}
