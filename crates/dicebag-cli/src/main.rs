// ABOUTME: Command-line interface for the dicebag dice library.
// ABOUTME: Provides roll, check, pool, and simulation commands with optional JSON output.

use clap::{Parser, Subcommand};
use dicebag::{Check, Dice, Die, RollMethod};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dicebag")]
#[command(about = "Roll custom and weighted dice")]
#[command(version)]
struct Cli {
    /// Seed the RNG for reproducible results
    #[arg(long, global = true, env = "DICEBAG_SEED")]
    seed: Option<u64>,

    /// Log parsing and roll details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a die given as "faces" or "faces:weights" (e.g., "1,2,3:1,1,2")
    Roll {
        die: String,

        /// Number of rolls
        #[arg(short = 'n', long, default_value = "1", allow_hyphen_values = true)]
        count: i64,

        /// normal, advantage, disadvantage, or exploding
        #[arg(short, long, default_value = "normal")]
        method: RollMethod,
    },
    /// Roll a die against a difficulty class
    Check {
        die: String,

        /// Difficulty class to meet or beat
        #[arg(long, allow_hyphen_values = true)]
        dc: i64,

        /// Added to the roll before comparing
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        modifier: i64,

        /// Natural maximum always succeeds, natural minimum always fails
        #[arg(long)]
        crits: bool,

        #[arg(short, long, default_value = "normal")]
        method: RollMethod,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Roll several dice at once, one result per die
    Pool {
        /// Dice, one argument each
        #[arg(required = true)]
        dice: Vec<String>,

        #[arg(short, long, default_value = "normal")]
        method: RollMethod,
    },
    /// Simulate rolling a die many times
    Sim {
        die: String,

        /// Number of trials to run
        #[arg(short, long, default_value = "10000")]
        n: usize,

        #[arg(short, long, default_value = "normal")]
        method: RollMethod,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dicebag=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_die(text: &str, seed: Option<u64>) -> dicebag::Result<Die> {
    match seed {
        Some(seed) => dicebag::parser::parse_seeded(text, seed),
        None => dicebag::parse(text),
    }
}

fn run(cli: Cli) -> dicebag::Result<()> {
    debug!(seed = ?cli.seed, "starting");

    match cli.command {
        Commands::Roll { die, count, method } => {
            let mut die = parse_die(&die, cli.seed)?;
            let rolls = die.roll_n_with(count, method)?;
            println!("{}", join(&rolls));
        }
        Commands::Check {
            die,
            dc,
            modifier,
            crits,
            method,
            json,
        } => {
            let mut die = parse_die(&die, cli.seed)?;
            let check = Check::new(dc).method(method).modifier(modifier).crits(crits);
            let outcome = die.check_detailed(&check)?;
            if json {
                println!("{}", json!(outcome));
            } else {
                let verdict = if outcome.success { "success" } else { "failure" };
                let critical = if outcome.critical.is_some() { " (critical)" } else { "" };
                println!(
                    "{} {:+} = {} vs DC {}: {}{}",
                    outcome.roll, modifier, outcome.total, dc, verdict, critical
                );
            }
        }
        Commands::Pool { dice, method } => {
            let mut pool = dice
                .iter()
                .enumerate()
                .map(|(i, text)| parse_die(text, cli.seed.map(|seed| seed.wrapping_add(i as u64))))
                .collect::<dicebag::Result<Dice>>()?;
            let rolls = pool.roll_with(method)?;
            let total: i64 = rolls.iter().sum();
            println!("[{}] = {}", join(&rolls), total);
        }
        Commands::Sim {
            die,
            n,
            method,
            json,
        } => {
            let result = match cli.seed {
                Some(seed) => dicebag::simulate_seeded(&die, method, n, seed)?,
                None => dicebag::simulate(&die, method, n)?,
            };
            if json {
                print_sim_json(&result);
            } else {
                print_sim_histogram(&die, method, &result);
            }
        }
    }

    Ok(())
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_sim_json(result: &dicebag::SimResult) {
    let output = json!({
        "n": result.n,
        "min": result.min,
        "max": result.max,
        "mean": result.mean,
        "std_dev": result.std_dev,
        "distribution": result.distribution,
    });

    println!("{:#}", output);
}

fn print_sim_histogram(die: &str, method: RollMethod, result: &dicebag::SimResult) {
    println!("{} [{}] (n={})", die, method, result.n);
    println!();

    let outcomes = result.sorted_outcomes();
    let max_count = outcomes.iter().map(|(_, c)| *c).max().unwrap_or(1);
    let max_bar_width = 40;

    for (value, count) in outcomes {
        let pct = (count as f64 / result.n as f64) * 100.0;
        let bar_width = (count as f64 / max_count as f64 * max_bar_width as f64) as usize;
        let bar: String = "█".repeat(bar_width);

        println!("{:>4}: {:40} {:5.1}%", value, bar, pct);
    }

    println!();
    println!("mean: {:.2}, std: {:.2}", result.mean, result.std_dev);
}
