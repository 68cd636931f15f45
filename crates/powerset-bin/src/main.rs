use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use powerset::{convert, convert_traced, Dfa, SimulateError, WriterTrace};

mod paced;
mod reference;

use paced::Paced;

/// Converts the example NFA to a DFA and runs input strings through it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Strings to simulate on the DFA
    #[arg(default_values = ["0111", "1"])]
    inputs: Vec<String>,

    /// Print every step of the subset construction
    #[arg(long)]
    trace: bool,

    /// Print the NFA and DFA as YAML
    #[arg(long)]
    yaml: bool,

    /// Delay after each printed character, in milliseconds
    #[arg(long, default_value_t = 0)]
    char_delay_ms: u64,

    /// Delay after each printed space or newline, in milliseconds
    #[arg(long, default_value_t = 0)]
    space_delay_ms: u64,
}

const SEPARATOR: &str = "**************************************************";

fn print_automaton<T>(out: &mut impl Write, title: &str, automaton: &T, yaml: bool) -> anyhow::Result<()>
where
    T: serde::Serialize + std::fmt::Display,
{
    if yaml {
        writeln!(out, "{}:", title)?;
        write!(out, "{}", serde_yaml::to_string(automaton)?)?;
    } else {
        writeln!(out, "Our {} is defined as follows:", title)?;
        writeln!(out, "{}", automaton)?;
    }
    Ok(())
}

fn simulate_input(out: &mut impl Write, dfa: &Dfa, input: &str) -> anyhow::Result<()> {
    writeln!(out, "Example Input: {}", input)?;
    match dfa.simulate(input) {
        Ok(accepted) => {
            let verdict = if accepted { "accepted" } else { "rejected" };
            writeln!(out, "Input: {}, is {}", input, verdict)?;
        }
        Err(err @ SimulateError::SymbolNotInAlphabet { .. }) => {
            writeln!(out, "Input: {}, {}", input, err)?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = Paced::new(
        stdout.lock(),
        Duration::from_millis(args.char_delay_ms),
        Duration::from_millis(args.space_delay_ms),
    );

    let nfa = reference::reference_nfa()?;
    print_automaton(&mut out, "NFA", &nfa, args.yaml)?;
    writeln!(out, "{}", SEPARATOR)?;

    let dfa = if args.trace {
        let mut trace = WriterTrace::new(&mut out, &nfa);
        let dfa = convert_traced(&nfa, &mut trace);
        trace.finish()?;
        writeln!(out, "{}", SEPARATOR)?;
        dfa
    } else {
        convert(&nfa)
    };
    print_automaton(&mut out, "DFA", &dfa, args.yaml)?;

    for input in &args.inputs {
        writeln!(out, "{}", SEPARATOR)?;
        simulate_input(&mut out, &dfa, input)?;
    }

    out.flush()?;
    Ok(())
}
