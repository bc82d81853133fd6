//! Random board generator
//!
//! Emits a board file on stdout for testing and benchmarking.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a random wolfgrid board file
#[derive(Parser, Debug)]
#[command(name = "gen_board")]
struct Args {
    /// Grid size N (board is N x N)
    size: usize,

    /// Fraction of cells holding a wolf
    #[arg(long, default_value_t = 0.05)]
    wolves: f64,

    /// Fraction of cells holding a squirrel
    #[arg(long, default_value_t = 0.10)]
    squirrels: f64,

    /// Fraction of cells holding a tree
    #[arg(long, default_value_t = 0.10)]
    trees: f64,

    /// Fraction of cells holding ice
    #[arg(long, default_value_t = 0.02)]
    ice: f64,

    /// Random seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    eprintln!("seed: {}", seed);

    println!("{}", args.size);
    for row in 0..args.size {
        for col in 0..args.size {
            let draw: f64 = rng.gen();
            let symbol = if draw < args.wolves {
                'w'
            } else if draw < args.wolves + args.squirrels {
                's'
            } else if draw < args.wolves + args.squirrels + args.trees {
                't'
            } else if draw < args.wolves + args.squirrels + args.trees + args.ice {
                'i'
            } else {
                continue;
            };
            println!("{} {} {}", row, col, symbol);
        }
    }
}
