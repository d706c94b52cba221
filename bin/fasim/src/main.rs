use std::{io::BufRead, path::PathBuf, process::ExitCode};

use fa_toolkit::prelude::*;
use owo_colors::OwoColorize;

use tracing::{debug, info, trace};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("fasim")
        .about("Converts a finite automaton and answers whether it accepts the lines read from stdin")
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
            Arg::new("pipeline")
                .required(true)
                .value_parser(|s: &str| s.parse::<Pipeline>())
                .help("one of lnfa-to-nfa, nfa-to-dfa or min-dfa"),
        )
        .arg(
            Arg::new("definition")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("file containing the automaton definition"),
        )
        .arg(
            Arg::new("epsilon")
                .long("epsilon")
                .default_value(DEFAULT_EPSILON_MARKER)
                .help("symbol that denotes an epsilon transition"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .default_value(DEFAULT_START_ID)
                .help("id of the start state"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("reject queries containing characters that are not symbols of the automaton"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("only print the answers to the queries"),
        )
}

/// Logs to stderr. An explicit `-v` level wins, otherwise `RUST_LOG` is honoured and warnings
/// are shown by default.
fn setup_logging(matches: &ArgMatches) {
    let filter = match matches.try_get_one::<String>("verbosity").ok().flatten() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();

    trace!("logging to stderr");
}

fn paint(status: Status) -> String {
    match status {
        Status::Accepted => status.green().to_string(),
        Status::Rejected => status.yellow().to_string(),
        Status::Aborted => status.red().to_string(),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (Some(&pipeline), Some(path), Some(epsilon), Some(start)) = (
        matches.get_one::<Pipeline>("pipeline"),
        matches.get_one::<PathBuf>("definition"),
        matches.get_one::<String>("epsilon"),
        matches.get_one::<String>("start"),
    ) else {
        unreachable!("clap enforces required arguments and defaults")
    };

    debug!("reading definition from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let options = ParseOptions::default()
        .with_epsilon_marker(epsilon.as_str())
        .with_start_id(start.as_str());
    let definition = Definition::parse_with(&text, &options)?;

    let start_time = std::time::Instant::now();
    let trace = pipeline.run_with_start(&definition, start)?;
    info!(
        "{pipeline} took {}µs",
        start_time.elapsed().as_micros()
    );

    if !matches.get_flag("quiet") {
        for (stage, step) in trace.steps() {
            println!("{} {} ({} states)", "#".dimmed(), stage.bold(), step.size());
            print!("{step}");
        }
    }

    let policy = if matches.get_flag("strict") {
        SymbolPolicy::Reject
    } else {
        SymbolPolicy::Intern
    };
    let mut automaton = trace.automaton();
    info!("answering queries as {}", automaton.variant());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match serve_line(&mut automaton, &line, policy) {
            Ok(status) => println!("{}", paint(status)),
            Err(e) => println!("{} {e}", "error:".red()),
        }
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
