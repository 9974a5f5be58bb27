use std::fs;
use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zzroll::{DiceResolver, EngineConfig, RngRoller};

/// Trials used for each histogram in interactive mode.
const INTERACTIVE_TRIALS: i64 = 50_000;

/// zzroll resolves integer expressions with dice notation, such as
/// "2d4 + 3d6 - 1", and reports their outcome distribution.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to resolve. Without one, zzroll reads expressions from
    /// standard input until "q".
    expression: Option<String>,

    /// Print the postfix (RPN) form of the expression.
    #[arg(short, long)]
    postfix: bool,

    /// Print a histogram over this many trials.
    #[arg(short, long)]
    trials: Option<i64>,

    /// Seed for reproducible rolls.
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with engine configuration.
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path),
        None => EngineConfig::default(),
    };
    let roller = match args.seed {
        Some(seed) => RngRoller::seeded(seed),
        None => RngRoller::from_entropy(),
    };
    let mut resolver = DiceResolver::with_roller(config, roller);

    match &args.expression {
        Some(expression) => run_once(&mut resolver, expression, &args),
        None => {
            if let Err(e) = run_interactive(&mut resolver) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// `RUST_LOG` directives when set and valid, errors only otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("error"))
}

fn load_config(path: &str) -> EngineConfig {
    let contents = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the config file '{path}'. Perhaps this file does not exist?");
        std::process::exit(1);
    });
    EngineConfig::from_json(&contents).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn run_once(resolver: &mut DiceResolver, expression: &str, args: &Args) {
    if args.postfix {
        println!("RPN:    {}", resolver.to_postfix(expression));
    }
    println!("ANSWER: {}", resolver.resolve(expression));
    if let Some(err) = resolver.last_error() {
        eprintln!("error: {err}");
    }
    if let Some(trials) = args.trials {
        print!("{}", resolver.histogram(expression, trials));
    }
}

fn run_interactive(resolver: &mut DiceResolver) -> io::Result<()> {
    let stdin = io::stdin();
    let mut previous = String::new();

    loop {
        print!("Enter expression to resolve, 'q' to quit [{previous}]: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        if !line.is_empty() {
            previous = line.to_string();
        }

        println!("RPN:    {}", resolver.to_postfix(&previous));
        println!("ANSWER: {}", resolver.resolve(&previous));
        print!("{}", resolver.histogram(&previous, INTERACTIVE_TRIALS));
    }
}
