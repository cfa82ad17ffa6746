use clap::Parser;
use jump_tour_solver::engine::{build_graph, Cell};
use jump_tour_solver::solver::{search_with_budget, Termination};
use jump_tour_solver::utils::{random_start, verify_path};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Runs the tour search from many start cells", long_about = None)]
struct Args {
    /// Board size (the board is SIZE x SIZE)
    #[clap(short, long, default_value_t = 10)]
    size: usize,

    /// Number of random start cells to evaluate
    #[clap(short = 'n', long, default_value_t = 20)]
    samples: usize,

    /// Seed for choosing start cells
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Stop each search after this many visited cells
    #[clap(long)]
    budget: Option<u64>,

    /// Evaluate every cell of the board instead of random samples
    #[clap(long)]
    all: bool,
}

struct RunRecord {
    start: Cell,
    termination: Termination,
    nodes_visited: u64,
    backtracks: u64,
    millis: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.size == 0 {
        anyhow::bail!("Board size must be at least 1");
    }

    let graph = build_graph(args.size);
    let starts: Vec<Cell> = if args.all {
        graph.cells().collect()
    } else {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        (0..args.samples)
            .filter_map(|_| random_start(args.size, &mut rng))
            .collect()
    };

    println!(
        "Evaluating {} start cells on a {n}x{n} board (seed {})...",
        starts.len(),
        args.seed,
        n = args.size
    );

    let total_clock = Instant::now();
    let mut records = Vec::with_capacity(starts.len());

    for start in starts {
        let clock = Instant::now();
        let solution = search_with_budget(&graph, start, args.budget)?;
        let millis = clock.elapsed().as_secs_f64() * 1000.0;

        if solution.is_complete() {
            if let Err(e) = verify_path(&solution.path, args.size) {
                eprintln!("Error: tour from {} failed verification: {}", start, e);
            }
        }

        println!(
            "  Start: {:<10} Result: {:<16} Visits: {:<10} Backtracks: {:<10} Time: {:.2} ms",
            start.to_string(),
            solution.termination,
            solution.nodes_visited,
            solution.backtracks,
            millis
        );

        records.push(RunRecord {
            start,
            termination: solution.termination,
            nodes_visited: solution.nodes_visited,
            backtracks: solution.backtracks,
            millis,
        });
    }

    println!("\n--- Evaluation Complete ---");
    if records.is_empty() {
        println!("No start cells evaluated.");
        return Ok(());
    }

    let count = |t: Termination| records.iter().filter(|r| r.termination == t).count();
    let runs = records.len() as f64;
    let mean_visits = records.iter().map(|r| r.nodes_visited).sum::<u64>() as f64 / runs;
    let mean_backtracks = records.iter().map(|r| r.backtracks).sum::<u64>() as f64 / runs;

    println!("Start cells evaluated: {}", records.len());
    println!("Complete tours:        {}", count(Termination::Complete));
    println!("Exhausted searches:    {}", count(Termination::Exhausted));
    println!("Budget exceeded:       {}", count(Termination::BudgetExceeded));
    println!("Average visits:        {:.2}", mean_visits);
    println!("Average backtracks:    {:.2}", mean_backtracks);

    if let Some(slowest) = records
        .iter()
        .max_by(|a, b| a.millis.partial_cmp(&b.millis).unwrap_or(std::cmp::Ordering::Equal))
    {
        println!(
            "Slowest start:         {} ({:.2} ms, {})",
            slowest.start, slowest.millis, slowest.termination
        );
    }
    println!("Total time:            {} ms", total_clock.elapsed().as_millis());

    Ok(())
}
