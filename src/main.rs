use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hospital_inventory::io::reporting;
use hospital_inventory::strategy::optimization::{
    best_combination, best_depot_capacity, best_review_period, DEFAULT_TRIALS,
};
use hospital_inventory::{run_simulation, PolicyConfig, ReorderDiscipline, SimRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hospital-inventory")]
#[command(about = "Two-echelon hospital inventory simulation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Seed for the random source (drawn from the OS when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one simulation and print its ledger as CSV followed by statistics
    Run(PolicyArgs),
    /// Run several simulations of the same policy and print averaged statistics
    Batch {
        #[command(flatten)]
        policy: PolicyArgs,
        /// Number of runs
        #[arg(short, long, default_value = "10")]
        runs: usize,
    },
    /// Estimate the best depot capacity, review period and combination
    Optimize {
        /// Repetitions per estimate
        #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,
    },
}

#[derive(Args, Debug)]
struct PolicyArgs {
    /// Simulation horizon in days
    #[arg(short, long, default_value = "20")]
    days: u32,

    /// Maximum depot inventory
    #[arg(short, long, default_value = "30")]
    capacity: u32,

    /// Days between reorder reviews
    #[arg(short = 'p', long, default_value = "6")]
    review_period: u32,

    /// Front stock on day one
    #[arg(long, default_value = "4")]
    initial_front: u32,

    /// Skip a review while an earlier order is still pending
    #[arg(long)]
    skip_while_pending: bool,
}

impl PolicyArgs {
    fn to_config(&self) -> PolicyConfig {
        PolicyConfig {
            initial_front_stock: self.initial_front,
            reorder: if self.skip_while_pending {
                ReorderDiscipline::SkipWhilePending
            } else {
                ReorderDiscipline::RearmEveryReview
            },
            ..PolicyConfig::new(self.days, self.capacity, self.review_period)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut rng = match cli.seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };
    info!(seed = rng.seed(), "Random source ready");

    match cli.command {
        Command::Run(policy) => {
            let config = policy.to_config();
            info!(?config, "Running simulation");
            let result = run_simulation(config, &mut rng)?;

            reporting::write_ledger(std::io::stdout().lock(), &result.ledger)?;
            println!();
            print!("{}", reporting::format_summary(&result.summary));
        }
        Command::Batch { policy, runs } => {
            let config = policy.to_config();
            info!(?config, runs, "Running batch");
            let batch = reporting::run_batch(&config, runs, &mut rng)?;
            print!("{}", reporting::format_batch(&batch));
        }
        Command::Optimize { trials } => {
            info!(trials, "Estimating optimal policy parameters");
            let capacity = best_depot_capacity(trials, &mut rng)?;
            let period = best_review_period(trials, &mut rng)?;
            let combination = best_combination(trials, &mut rng)?;

            println!("Optimal Max Depot: {}", capacity);
            println!("Optimal Review Period: {}", period);
            println!("Optimal Combination: {}", combination);
        }
    }

    Ok(())
}
