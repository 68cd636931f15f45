use powerset::{Nfa, NfaBuilder, NfaError, EPSILON};

/// q0 -ε-> q1, q1 loops on '1' and moves to q2 on '0', q2 accepts and
/// loops on everything: any string over {0, 1} containing a '0'.
pub fn reference_nfa() -> Result<Nfa, NfaError> {
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
        .build()
}
