use clap::Parser;
use minescout::{
    board::Board,
    engine::{
        stats::{render_stats_table, ObservationRecord},
        Engine,
    },
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Plays one game of Minesweeper: safe moves while the engine can prove any,
/// random probes otherwise.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 8)]
    height: u32,
    #[arg(long, default_value_t = 8)]
    width: u32,
    #[arg(long, default_value_t = 8)]
    mines: u32,
    /// Seed for both the board layout and the engine's random probes.
    #[arg(long)]
    seed: Option<u64>,
    /// Print a per-observation propagation statistics table.
    #[arg(long)]
    stats: bool,
    /// Dump the engine's final knowledge as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    println!(
        "Playing {}x{} with {} mines (seed {})",
        args.height, args.width, args.mines, seed
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let board = Board::random(args.height, args.width, args.mines, &mut rng)
        .expect("board parameters must be satisfiable");
    let mut engine = Engine::with_seed(args.height, args.width, seed);
    let mut records: Vec<ObservationRecord> = Vec::new();

    let safe_cells = board.grid().len() - board.mine_count() as u64;
    let mut outcome = "stuck: no moves left";

    for turn in 1.. {
        let (cell, proven) = match engine.make_safe_move() {
            Some(cell) => (cell, true),
            None => match engine.make_random_move() {
                Some(cell) => (cell, false),
                None => break,
            },
        };

        if board.is_mine(cell) {
            println!("turn {turn}: probed {cell} at random... boom");
            outcome = "lost";
            break;
        }

        let count = board.nearby_mines(cell);
        let kind = if proven { "safe" } else { "random" };
        println!("turn {turn}: {kind} probe {cell}, {count} nearby");
        let stats = engine
            .add_observation(cell, count)
            .expect("driver only feeds fresh in-bounds observations");
        records.push(ObservationRecord { cell, count, stats });

        if board.won(engine.mine_cells()) || engine.moves_made().len() as u64 == safe_cells {
            outcome = "won";
            break;
        }
    }

    println!("\nOutcome: {outcome}");
    println!(
        "Probed {} cells, proved {} safe and {} mines ({} actual)",
        engine.moves_made().len(),
        engine.safe_cells().len(),
        engine.mine_cells().len(),
        board.mine_count()
    );
    println!("\nBoard:\n{board}");

    if args.stats {
        println!("\nPropagation statistics:\n{}", render_stats_table(&records));
    }
    if args.json {
        let snapshot = engine.snapshot();
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).expect("snapshot serialises")
        );
    }
}
