use std::collections::{BTreeSet, HashSet};

use clap::Parser;
use color_eyre::eyre::{bail, ensure};

use qmc_rs::minimize::minimize;

/// Largest number of variables accepted on the command line.
const MAX_VARIABLES: usize = 6;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Minterms (rows where the function is true), comma separated.
    #[arg(short, long, value_name = "INT,...", value_delimiter = ',', required = true)]
    minterms: Vec<u32>,

    /// Variable symbols, one letter each (e.g. `ABC`).
    #[arg(short, long, value_name = "LETTERS")]
    variables: String,

    /// Print the merge rounds.
    #[clap(long)]
    trace: bool,

    /// Print the prime-implicant chart.
    #[clap(long)]
    chart: bool,

    /// Enable debug logging.
    #[clap(long)]
    verbose: bool,
}

fn parse_variables(input: &str) -> color_eyre::Result<Vec<char>> {
    let variables: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    ensure!(!variables.is_empty(), "Please enter at least one variable");
    if let Some(c) = variables.iter().find(|c| !c.is_ascii_alphabetic()) {
        bail!("Invalid variable '{}': variables must be letters", c);
    }
    ensure!(
        variables.len() <= MAX_VARIABLES,
        "Maximum of {} variables allowed",
        MAX_VARIABLES
    );
    let unique: HashSet<char> = variables.iter().copied().collect();
    ensure!(unique.len() == variables.len(), "Duplicate variables are not allowed");
    Ok(variables)
}

fn check_minterms(minterms: &[u32], variables: &[char]) -> color_eyre::Result<()> {
    ensure!(!minterms.is_empty(), "Please enter at least one minterm");

    let mut seen = HashSet::new();
    let duplicates: BTreeSet<u32> = minterms.iter().copied().filter(|m| !seen.insert(*m)).collect();
    let duplicates: Vec<u32> = duplicates.into_iter().collect();
    ensure!(duplicates.is_empty(), "Duplicate minterm(s): {:?}", duplicates);

    let largest = minterms.iter().copied().max().unwrap_or_default();
    let limit = (1u32 << variables.len()) - 1;
    ensure!(
        largest <= limit,
        "Minterm {} needs more than {} variables (largest allowed is {})",
        largest,
        variables.len(),
        limit
    );
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let variables = parse_variables(&args.variables)?;
    check_minterms(&args.minterms, &variables)?;

    let time_total = std::time::Instant::now();
    let result = minimize(&args.minterms, &variables);
    log::info!("Minimized in {:.3?}", time_total.elapsed());

    println!("Minterms:    {:?}", result.minterms);
    println!("Complements: {:?}", result.complements);
    let binaries: Vec<String> = result.binary_numbers.iter().map(|t| t.to_string()).collect();
    println!("Binary:      {}", binaries.join(" "));

    println!("Groups:");
    for (ones, terms) in result.binary_groups.iter() {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        println!("  {} ones: {}", ones, terms.join(" "));
    }

    if args.trace {
        for (i, iteration) in result.iterations.iter().enumerate() {
            println!("Round {}:", i + 1);
            println!("{}", iteration);
        }
    }

    let primes: Vec<String> = result.prime_implicants.iter().map(|t| t.to_string()).collect();
    println!("Prime implicants: {}", primes.join(" "));

    if args.chart {
        print!("{}", result.chart());
    }

    let essential: Vec<String> = result.essential_pis.iter().map(|t| t.to_string()).collect();
    let additional: Vec<String> = result.additional_pis.iter().map(|t| t.to_string()).collect();
    println!("Essential:  {}", essential.join(" "));
    println!("Additional: {}", additional.join(" "));

    for (pi, term) in result.minimal_cover.iter().zip(&result.term_breakdown) {
        println!("  {} => {}", pi, term);
    }
    println!("F = {}", result.expression);

    Ok(())
}
