use clap::Parser;
use lbs_solver::engine::Board;
use lbs_solver::tree::Position;
use lbs_solver::utils::board_from_str;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (one row per line, cells B/R/G/-)
    #[clap(required_unless_present = "random", conflicts_with = "random")]
    board_file: Option<PathBuf>,

    /// Analyze a random fully occupied board of the given size instead,
    /// e.g. --random 3x3
    #[clap(long, value_name = "WxH", value_parser = parse_dimensions)]
    random: Option<(usize, usize)>,

    /// Seed for --random
    #[clap(long, default_value_t = 514514)]
    seed: u64,
}

fn parse_dimensions(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: usize = w.parse().map_err(|_| format!("invalid width '{}'", w))?;
    let height: usize = h.parse().map_err(|_| format!("invalid height '{}'", h))?;
    if width == 0 || height == 0 {
        return Err("board dimensions must be at least 1x1".to_string());
    }
    Ok((width, height))
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() {
    let args = Args::parse();

    let board = if let Some((width, height)) = args.random {
        let board = Board::random_with_seed(width, height, args.seed);
        println!("Generated random {}x{} board (seed {})\n", width, height, args.seed);
        board
    } else {
        let path = args
            .board_file
            .as_ref()
            .expect("clap guarantees a board file when --random is absent");
        let board = read_board_file(path)
            .unwrap_or_else(|e| panic!("Failed to load board from {}: {}", path.display(), e));
        println!("Loaded board from {}\n", path.display());
        board
    };

    println!("Board to analyze:\n{}\n", board);
    println!(
        "Building game tree for {} occupied cells...\n",
        board.occupied_count()
    );

    let start = Instant::now();
    let mut root = Position::new(board);
    let outcome = root.analyze();
    let elapsed = start.elapsed();

    println!("Outcome class: {}", outcome);
    println!("Analysis time: {:.3?}", elapsed);
}
