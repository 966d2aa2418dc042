use std::process::ExitCode;

use automata_lstar::prelude::*;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing::{debug, info, trace};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Words whose classification is printed after learning.
const SHOWCASE: [&str; 6] = [
    "",
    "HELLO AUTH",
    "AUTH",
    "HELLO AUTH CLOSE HELLO AUTH",
    "HELLO AUTH DATA DATA",
    "HELLO DATA",
];

fn cli() -> Command {
    Command::new("lstar-protocol")
        .about("Learns a DFA for a simple session protocol by querying a simulator")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .value_parser(["scan", "index"])
                .default_value("scan")
                .help("how closedness and consistency violations are searched"),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .value_parser(clap::value_parser!(usize))
                .default_value("6")
                .help("length up to which equivalence queries test words"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .action(ArgAction::SetTrue)
                .help("print the learned automaton in graphviz format"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let filter = match matches.get_one::<String>("verbosity") {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };

    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(filter))
        .init();

    trace!("logging set up");
}

/// The states a session of the simulated protocol can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Session {
    #[default]
    Init,
    Ready,
    Authenticated,
    Failed,
}

/// Simulates a server speaking the protocol. A session starts in `Init`, `HELLO` makes it ready, `AUTH`
/// authenticates it, `DATA` is only allowed once authenticated and `CLOSE` ends the session. Any other
/// message fails the session for good.
#[derive(Debug, Default)]
struct ProtocolSimulator {
    session: Session,
    resets: usize,
}

impl ProtocolSimulator {
    fn reset(&mut self) {
        self.session = Session::Init;
        self.resets += 1;
    }

    fn send(&mut self, message: &str) {
        self.session = match (self.session, message) {
            (Session::Init, "HELLO") => Session::Ready,
            (Session::Ready, "AUTH") => Session::Authenticated,
            (Session::Authenticated, "DATA") => Session::Authenticated,
            (Session::Authenticated, "CLOSE") => Session::Init,
            _ => Session::Failed,
        };
    }

    /// Replays `messages` in a fresh session and reports whether the session is still alive afterwards.
    fn run(&mut self, messages: &[&'static str]) -> bool {
        self.reset();
        for message in messages {
            self.send(message);
            if self.session == Session::Failed {
                return false;
            }
        }
        true
    }
}

fn learn<C: TableStrategy>(
    strategy: C,
    depth: usize,
    config: LStarConfig,
) -> Result<(Dfa<&'static str>, QueryStats, usize), LearningError> {
    let alphabet = alphabet!("HELLO", "AUTH", "DATA", "CLOSE");
    let sample = Sample::new(
        [word::tokens("HELLO AUTH"), word::tokens("HELLO AUTH DATA CLOSE")],
        [word::tokens("AUTH"), word::tokens("HELLO HELLO")],
    );
    debug!("learning over alphabet {}", alphabet.show());

    let mut simulator = ProtocolSimulator::default();
    let (dfa, stats) = {
        let oracle = BoundedOracle::new(alphabet.clone(), depth, |w: &[&'static str]| {
            simulator.run(w)
        });
        LStar::new(alphabet, sample, oracle)?
            .with_config(config)
            .with_strategy(strategy)
            .infer_with_stats()?
    };
    Ok((dfa, stats, simulator.resets))
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    setup_logging(&matches);

    let config = match LStarConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };
    let depth = matches.get_one::<usize>("depth").copied().unwrap_or(6);

    let start = std::time::Instant::now();
    let outcome = match matches.get_one::<String>("strategy").map(String::as_str) {
        Some("index") => learn(SignatureIndex, depth, config),
        _ => learn(SortedScan, depth, config),
    };
    let (dfa, stats, resets) = match outcome {
        Ok(learned) => learned,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };
    info!("learning took {}ms", start.elapsed().as_millis());

    println!(
        "{} {} states, {} ({} simulator sessions)",
        "learned".green().bold(),
        dfa.size(),
        stats.show(),
        resets
    );
    println!("{dfa:?}");
    for text in SHOWCASE {
        let word = word::tokens(text);
        let verdict = if dfa.accepts(&word) {
            "accept".green().to_string()
        } else {
            "reject".red().to_string()
        };
        println!("{:>30}  {verdict}", word.show().blue());
    }
    if matches.get_flag("dot") {
        println!("{}", dfa.dot_representation());
    }

    ExitCode::SUCCESS
}
