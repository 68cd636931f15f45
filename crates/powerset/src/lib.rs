mod alphabet;
mod closure;
mod dfa;
mod error;
mod nfa;
mod state_set;
mod subset;
mod trace;


pub use alphabet::{Alphabet, Label, EPSILON};
pub use dfa::{Dfa, DfaStateIdx};
pub use error::{NfaError, SimulateError};
pub use nfa::{Nfa, NfaBuilder, NfaStateIdx};
pub use state_set::StateSet;
pub use subset::{convert, convert_traced};
pub use trace::{NoTrace, TraceEvent, TraceSink, WriterTrace};
