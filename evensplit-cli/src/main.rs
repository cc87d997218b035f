use anyhow::{anyhow, Result};
use clap::{arg, Command};
use evensplit_core::{Instance, Params, Partitioner, Split};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{Map, Value};
use std::{fs, io::Read, time::Instant};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("evensplit-cli")
        .about("Divides sets of numbers into two evenly-summed batches")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("demo")
                .about("Generates random instances, solves them and prints both batches")
                .arg(
                    arg!(--size [SIZE] "Number of items per instance")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--runs [RUNS] "Number of instances to solve")
                        .default_value("1")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"min-value" [MIN] "Smallest item value")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"max-value" [MAX] "Largest item value")
                        .default_value("299")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for instance generation; random if omitted")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates an instance and prints it as json")
                .arg(arg!(<SEED> "Seed value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--size [SIZE] "Number of items")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"min-value" [MIN] "Smallest item value")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"max-value" [MAX] "Largest item value")
                        .default_value("299")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Computes a split for a set of items and prints it as json")
                .arg(
                    arg!(<ITEMS> "Items json array, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a split against a set of items")
                .arg(
                    arg!(<ITEMS> "Items json array, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SPLIT> "Split json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    init_tracing();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("demo", sub_m)) => demo(
            *sub_m.get_one::<usize>("size").unwrap(),
            *sub_m.get_one::<usize>("runs").unwrap(),
            *sub_m.get_one::<u64>("min-value").unwrap(),
            *sub_m.get_one::<u64>("max-value").unwrap(),
            sub_m.get_one::<u64>("seed").copied(),
        ),
        Some(("generate", sub_m)) => generate(
            *sub_m.get_one::<u64>("SEED").unwrap(),
            *sub_m.get_one::<usize>("size").unwrap(),
            *sub_m.get_one::<u64>("min-value").unwrap(),
            *sub_m.get_one::<u64>("max-value").unwrap(),
        ),
        Some(("solve", sub_m)) => solve(sub_m.get_one::<String>("ITEMS").unwrap()),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<String>("ITEMS").unwrap(),
            sub_m.get_one::<String>("SPLIT").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// Logs go to stderr so stdout stays reserved for command output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("EVENSPLIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn demo(
    size: usize,
    runs: usize,
    min_value: u64,
    max_value: u64,
    seed: Option<u64>,
) -> Result<()> {
    let params = Params {
        num_items: size,
        min_value,
        max_value,
    };
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, runs, size, "running demo");
    let mut seed_rng = StdRng::seed_from_u64(seed);

    for run in 0..runs {
        let instance = Instance::generate(&seed_rng.gen(), &params)?;
        let started = Instant::now();
        let split = instance.solve()?;
        debug!(run, elapsed_ms = started.elapsed().as_millis() as u64, "split computed");
        let (first_sum, second_sum) = instance.verify_split(&split)?;

        print_batch("Batch #1 :", &split.first, &instance.items);
        print_batch("Batch #2 :", &split.second, &instance.items);
        println!("Diff: {}\n", first_sum.abs_diff(second_sum));
    }

    Ok(())
}

fn print_batch(label: &str, batch: &[usize], items: &[u64]) {
    let mut sum = 0u64;
    print!("{}", label);
    for (position, &index) in batch.iter().enumerate() {
        sum += items[index];
        if position > 0 {
            print!(" +");
        }
        print!(" {}", items[index]);
    }
    println!(" = {}", sum);
}

fn generate(seed: u64, size: usize, min_value: u64, max_value: u64) -> Result<()> {
    let params = Params {
        num_items: size,
        min_value,
        max_value,
    };
    let instance = Instance::generate(&StdRng::seed_from_u64(seed).gen(), &params)?;
    println!("{}", serde_json::to_string(&instance)?);
    Ok(())
}

fn solve(items: &str) -> Result<()> {
    let mut partitioner = Partitioner::new(load_items(items)?)?;
    let started = Instant::now();
    partitioner.calc()?;
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "split computed");
    println!("{}", serde_json::to_string(&partitioner.split())?);
    Ok(())
}

fn verify(items: &str, split: &str) -> Result<()> {
    let partitioner = Partitioner::new(load_items(items)?)?;
    let split = load_split(split)?;
    let (first_sum, second_sum) = evensplit_core::verify_split(partitioner.items(), &split)?;
    println!(
        "Split is valid (first = {}, second = {}, diff = {})",
        first_sum,
        second_sum,
        first_sum.abs_diff(second_sum)
    );
    Ok(())
}

fn load_json_text(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read stdin: {}", e))?;
        Ok(buffer)
    } else if arg.ends_with(".json") {
        fs::read_to_string(arg).map_err(|e| anyhow!("Failed to read file {}: {}", arg, e))
    } else {
        Ok(arg.to_string())
    }
}

fn load_items(arg: &str) -> Result<Vec<i64>> {
    let text = load_json_text(arg)?;
    serde_json::from_str(&text).map_err(|e| anyhow!("Failed to parse items: {}", e))
}

fn load_split(arg: &str) -> Result<Split> {
    let text = load_json_text(arg)?;
    let map: Map<String, Value> =
        serde_json::from_str(&text).map_err(|e| anyhow!("Failed to parse split: {}", e))?;
    Split::try_from(map).map_err(|e| anyhow!("Failed to parse split: {}", e))
}
