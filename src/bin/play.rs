use clap::Parser;
use lbs_solver::engine::Board;
use lbs_solver::tree::Position;
use lbs_solver::utils::board_from_str;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (one row per line, cells B/R/G/-)
    board_file: PathBuf,

    /// Play against another human at this terminal instead of the computer
    #[clap(long)]
    hotseat: bool,

    /// Play second (right, R cells); the computer opens as left
    #[clap(long, conflicts_with = "hotseat")]
    second: bool,
}

fn main() {
    let args = Args::parse();

    let content = fs::read_to_string(&args.board_file)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", args.board_file.display(), e));
    let board = board_from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid board in {}: {}", args.board_file.display(), e));

    println!("Welcome to Last Block Standing!");
    if args.hotseat {
        play_hotseat(board);
    } else {
        play_computer(board, !args.second);
    }
}

/// Two humans alternating at the same terminal. Left (B/G cells) moves
/// first; a player with no legal move loses.
fn play_hotseat(mut board: Board) {
    loop {
        if !board.has_left_moves() {
            println!("{}", board);
            println!("Game over, second player won.");
            return;
        }
        println!("First player's turn (B/G cells):");
        println!("{}", board);
        if !human_move(&mut board, true) {
            return;
        }

        if !board.has_right_moves() {
            println!("{}", board);
            println!("Game over, first player won.");
            return;
        }
        println!("Second player's turn (R/G cells):");
        println!("{}", board);
        if !human_move(&mut board, false) {
            return;
        }
    }
}

/// Human versus computer. Left always moves first; `human_is_left` decides
/// which side the human plays. The computer rebuilds a fresh game tree from
/// the live board before every reply.
fn play_computer(mut board: Board, human_is_left: bool) {
    loop {
        if !board.has_left_moves() {
            println!("{}", board);
            if human_is_left {
                println!("Game over, the computer won.");
            } else {
                println!("Game over, you won!");
            }
            return;
        }
        if human_is_left {
            println!("Your turn (B/G cells):");
            println!("{}", board);
            if !human_move(&mut board, true) {
                return;
            }
        } else {
            computer_move(&mut board, true);
        }

        if !board.has_right_moves() {
            println!("{}", board);
            if human_is_left {
                println!("Game over, you won!");
            } else {
                println!("Game over, the computer won.");
            }
            return;
        }
        if human_is_left {
            computer_move(&mut board, false);
        } else {
            println!("Your turn (R/G cells):");
            println!("{}", board);
            if !human_move(&mut board, false) {
                return;
            }
        }
    }
}

/// Prompts until the player enters a legal move (applied to `board`) or
/// quits. Returns `false` on quit.
fn human_move(board: &mut Board, as_left: bool) -> bool {
    loop {
        print!("Enter your move (row col), or 'q' to quit: ");
        io::stdout().flush().expect("stdout flush failed");

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }
        let trimmed = input.trim();

        if trimmed == "q" {
            println!("Thanks for playing!");
            return false;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input format. Use 'row col' or 'q'.");
            continue;
        }
        if let (Ok(row), Ok(col)) = (parts[0].parse::<usize>(), parts[1].parse::<usize>()) {
            if row >= board.height() || col >= board.width() {
                println!(
                    "Invalid coordinates: row must be below {} and col below {}.",
                    board.height(),
                    board.width()
                );
                continue;
            }
            let removable = if as_left {
                board.is_left_removable(row, col)
            } else {
                board.is_right_removable(row, col)
            };
            if !removable {
                println!("Invalid move, try again.");
                continue;
            }
            board.remove_cell(row, col);
            board.apply_gravity();
            return true;
        } else {
            println!("Invalid input: please enter numbers for row and column (e.g. '1 2').");
        }
    }
}

/// Analyzes the live board and plays the computer's reply: a winning move
/// when one exists, otherwise an arbitrary legal one.
fn computer_move(board: &mut Board, as_left: bool) {
    println!("Computer's turn:");
    println!("{}", board);

    let mut root = Position::new(board.clone());
    root.analyze();
    let reply = root
        .find_winning_move(as_left)
        .or_else(|| root.find_legal_move(as_left))
        .expect("computer only moves when it has at least one legal move");
    *board = reply.clone();
}
