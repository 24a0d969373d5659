//! Game-tree construction and outcome classification.
//!
//! A `Position` wraps a board snapshot it exclusively owns and, once built,
//! the children reachable by one legal move of each player. Classification
//! is the standard combinatorial-game-theory outcome computation: a
//! position is a win for the player who can move to a position that is a
//! loss for the opponent to move (`Zero`) or an outright win for themselves.
//!
//! Tree size is exponential in the number of occupied cells in the worst
//! case; no transposition table or memoization is attempted, and callers
//! wanting a time bound must impose one externally.
use crate::engine::Board;
use std::fmt;

/// The combinatorial-game outcome of a position under normal play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeClass {
    /// The left player wins regardless of who moves next.
    Left,
    /// The right player wins regardless of who moves next.
    Right,
    /// Whoever moves next wins (fuzzy, N).
    Fuzzy,
    /// Whoever moves next loses (zero, P).
    Zero,
}

impl OutcomeClass {
    /// The conventional one-letter CGT name: `L`, `R`, `N` or `P`.
    pub fn letter(&self) -> char {
        match self {
            OutcomeClass::Left => 'L',
            OutcomeClass::Right => 'R',
            OutcomeClass::Fuzzy => 'N',
            OutcomeClass::Zero => 'P',
        }
    }

    /// Returns whether reaching a child of this class wins for the left
    /// player: either left wins outright, or the mover (here the opponent)
    /// loses.
    fn wins_for_left(&self) -> bool {
        matches!(self, OutcomeClass::Left | OutcomeClass::Zero)
    }

    /// Symmetric counterpart of `wins_for_left`.
    fn wins_for_right(&self) -> bool {
        matches!(self, OutcomeClass::Right | OutcomeClass::Zero)
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeClass::Left => "L (left wins)",
            OutcomeClass::Right => "R (right wins)",
            OutcomeClass::Fuzzy => "N (next player wins)",
            OutcomeClass::Zero => "P (next player loses)",
        };
        write!(f, "{}", name)
    }
}

/// A node of the game tree: an exclusively owned board snapshot plus the
/// child positions reachable by one legal move of each side.
///
/// Children are stored in the order they were generated (row-major over the
/// board). Two moves that happen to produce equal boards still count as two
/// distinct children.
///
/// # Examples
/// ```
/// use lbs_solver::tree::{OutcomeClass, Position};
/// use lbs_solver::utils::board_from_lines;
///
/// let board = board_from_lines(&["B"]).unwrap();
/// let mut root = Position::new(board);
/// assert_eq!(root.analyze(), OutcomeClass::Left);
/// assert!(root.find_winning_move(true).is_some());
/// assert!(root.find_legal_move(false).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    left_children: Vec<Position>,
    right_children: Vec<Position>,
    outcome: Option<OutcomeClass>,
}

impl Position {
    /// Wraps a board as an unbuilt root position.
    pub fn new(board: Board) -> Self {
        Position {
            board,
            left_children: Vec::new(),
            right_children: Vec::new(),
            outcome: None,
        }
    }

    /// Returns the board snapshot this position wraps.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the outcome class, or `None` if `classify` has not run yet.
    pub fn outcome_class(&self) -> Option<OutcomeClass> {
        self.outcome
    }

    /// Returns whether the left player, moving next, can force a win: some
    /// already generated left child is `Left` or `Zero`.
    pub fn left_can_win(&self) -> bool {
        self.left_children
            .iter()
            .any(|child| child.outcome.is_some_and(|o| o.wins_for_left()))
    }

    /// Returns whether the right player, moving next, can force a win: some
    /// already generated right child is `Right` or `Zero`.
    pub fn right_can_win(&self) -> bool {
        self.right_children
            .iter()
            .any(|child| child.outcome.is_some_and(|o| o.wins_for_right()))
    }

    /// Recursively populates the children of this position, depth-first.
    ///
    /// Enumeration is pruned: once a side is known to have a winning reply,
    /// no further children are generated for that side, and once both sides
    /// have one the position is necessarily `Fuzzy` and enumeration stops
    /// entirely. The pruning never changes the classified outcome, only the
    /// work performed; the first-found winning child doubles as the move
    /// `find_winning_move` reports.
    ///
    /// Every generated child has its own subtree built and classified
    /// before it is appended, so the win predicates above only ever see
    /// classified children.
    pub fn build(&mut self) {
        for row in 0..self.board.height() {
            for col in 0..self.board.width() {
                if self.left_can_win() && self.right_can_win() {
                    return;
                }
                let cell = self.board.cell(row, col);
                if cell.is_left_removable() && !self.left_can_win() {
                    let child = self.expand(row, col);
                    self.left_children.push(child);
                }
                if cell.is_right_removable() && !self.right_can_win() {
                    let child = self.expand(row, col);
                    self.right_children.push(child);
                }
            }
        }
    }

    /// Applies one move: deep-copies the board, removes the chosen cell,
    /// settles gravity, then builds and classifies the resulting subtree.
    fn expand(&self, row: usize, col: usize) -> Position {
        let mut board = self.board.clone();
        board.remove_cell(row, col);
        board.apply_gravity();
        let mut child = Position::new(board);
        child.build();
        child.classify();
        child
    }

    /// Computes and stores the outcome class from the (possibly pruned)
    /// children. Must run after `build`; a position with no legal move for
    /// either side classifies as `Zero`.
    pub fn classify(&mut self) -> OutcomeClass {
        let outcome = match (self.left_can_win(), self.right_can_win()) {
            (true, true) => OutcomeClass::Fuzzy,
            (true, false) => OutcomeClass::Left,
            (false, true) => OutcomeClass::Right,
            (false, false) => OutcomeClass::Zero,
        };
        self.outcome = Some(outcome);
        outcome
    }

    /// Builds the full tree and classifies this position in one step.
    pub fn analyze(&mut self) -> OutcomeClass {
        self.build();
        self.classify()
    }

    /// Returns the board of the first generated child whose class wins for
    /// the asking side, or `None` if no winning move exists. Which winning
    /// line is reported when several exist is unspecified.
    pub fn find_winning_move(&self, for_left: bool) -> Option<&Board> {
        if for_left {
            self.left_children
                .iter()
                .find(|child| child.outcome.is_some_and(|o| o.wins_for_left()))
                .map(Position::board)
        } else {
            self.right_children
                .iter()
                .find(|child| child.outcome.is_some_and(|o| o.wins_for_right()))
                .map(Position::board)
        }
    }

    /// Returns the board of an arbitrary child of the asking side, used as
    /// a fallback when no winning move exists. `None` if the side has no
    /// legal move at all.
    pub fn find_legal_move(&self, for_left: bool) -> Option<&Board> {
        let children = if for_left {
            &self.left_children
        } else {
            &self.right_children
        };
        children.first().map(Position::board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Board, Cell};
    use crate::utils::board_from_lines;

    /// Reference classifier with no pruning: generates every child of both
    /// sides and classifies bottom-up. Used to check that the pruned
    /// builder computes identical outcomes.
    fn classify_exhaustive(board: &Board) -> OutcomeClass {
        let mut left_can_win = false;
        let mut right_can_win = false;
        for row in 0..board.height() {
            for col in 0..board.width() {
                let cell = board.cell(row, col);
                if cell == Cell::Empty {
                    continue;
                }
                let mut child = board.clone();
                child.remove_cell(row, col);
                child.apply_gravity();
                let child_class = classify_exhaustive(&child);
                if cell.is_left_removable() {
                    left_can_win |= child_class.wins_for_left();
                }
                if cell.is_right_removable() {
                    right_can_win |= child_class.wins_for_right();
                }
            }
        }
        match (left_can_win, right_can_win) {
            (true, true) => OutcomeClass::Fuzzy,
            (true, false) => OutcomeClass::Left,
            (false, true) => OutcomeClass::Right,
            (false, false) => OutcomeClass::Zero,
        }
    }

    fn analyze_lines(lines: &[&str]) -> OutcomeClass {
        let board = board_from_lines(lines).unwrap();
        Position::new(board).analyze()
    }

    #[test]
    fn test_outcome_letters() {
        assert_eq!(OutcomeClass::Left.letter(), 'L');
        assert_eq!(OutcomeClass::Right.letter(), 'R');
        assert_eq!(OutcomeClass::Fuzzy.letter(), 'N');
        assert_eq!(OutcomeClass::Zero.letter(), 'P');
    }

    #[test]
    fn test_empty_board_is_zero() {
        let mut root = Position::new(Board::new_empty(3, 2));
        assert_eq!(root.analyze(), OutcomeClass::Zero);
        assert!(root.find_legal_move(true).is_none());
        assert!(root.find_legal_move(false).is_none());
    }

    #[test]
    fn test_single_left_block_is_left_win() {
        assert_eq!(analyze_lines(&["B"]), OutcomeClass::Left);
    }

    #[test]
    fn test_single_right_block_is_right_win() {
        assert_eq!(analyze_lines(&["R"]), OutcomeClass::Right);
    }

    #[test]
    fn test_single_shared_block_is_fuzzy() {
        // Either player may take the lone shared block, moving to the empty
        // board (a P position), so whoever moves next wins.
        assert_eq!(analyze_lines(&["G"]), OutcomeClass::Fuzzy);
    }

    #[test]
    fn test_two_block_row_br_is_zero() {
        // Left taking B leaves "-R": the R survives in its full column of
        // height one, so the child is an R position. Right taking R leaves
        // "B-", an L position. Neither side can move to a win for itself,
        // so the mover always loses.
        assert_eq!(analyze_lines(&["BR"]), OutcomeClass::Zero);
    }

    #[test]
    fn test_outcome_is_unset_before_classify() {
        let mut root = Position::new(board_from_lines(&["BR"]).unwrap());
        assert_eq!(root.outcome_class(), None);
        root.build();
        assert_eq!(root.outcome_class(), None);
        root.classify();
        assert_eq!(root.outcome_class(), Some(OutcomeClass::Zero));
    }

    #[test]
    fn test_children_are_classified_bottom_up() {
        let mut root = Position::new(board_from_lines(&["BR"]).unwrap());
        root.build();
        for child in root.left_children.iter().chain(&root.right_children) {
            assert!(
                child.outcome_class().is_some(),
                "Every generated child must already be classified"
            );
        }
    }

    #[test]
    fn test_find_winning_move_one_sided() {
        let mut root = Position::new(board_from_lines(&["B"]).unwrap());
        root.analyze();

        let reply = root.find_winning_move(true).expect("left wins here");
        assert_eq!(reply.occupied_count(), 0);
        assert!(root.find_winning_move(false).is_none());
        assert!(root.find_legal_move(false).is_none());
    }

    #[test]
    fn test_find_winning_move_fuzzy_both_sides() {
        let mut root = Position::new(board_from_lines(&["G"]).unwrap());
        assert_eq!(root.analyze(), OutcomeClass::Fuzzy);
        assert!(root.find_winning_move(true).is_some());
        assert!(root.find_winning_move(false).is_some());
    }

    #[test]
    fn test_find_legal_move_when_losing() {
        // In "BR" neither side has a winning move, but both have a legal one.
        let mut root = Position::new(board_from_lines(&["BR"]).unwrap());
        root.analyze();
        assert!(root.find_winning_move(true).is_none());
        assert!(root.find_winning_move(false).is_none());
        let fallback = root.find_legal_move(true).expect("left has a legal move");
        assert!(!fallback.has_left_moves());
    }

    #[test]
    fn test_shared_row_outcome_is_parity() {
        // In a single row of shared blocks every block sits in a full
        // height-one column, so each move removes exactly one block and the
        // game is decided by parity: odd counts are N, even counts are P.
        assert_eq!(analyze_lines(&["GG"]), OutcomeClass::Zero);
        assert_eq!(analyze_lines(&["GGG"]), OutcomeClass::Fuzzy);
        assert_eq!(analyze_lines(&["GGGG"]), OutcomeClass::Zero);
    }

    #[test]
    fn test_pruning_stops_enumeration_once_fuzzy() {
        // Removing any block of "GGG" reaches the P position "GG", so the
        // first cell already gives both sides a winning reply and
        // enumeration stops after one child per side.
        let mut root = Position::new(board_from_lines(&["GGG"]).unwrap());
        assert_eq!(root.analyze(), OutcomeClass::Fuzzy);
        assert_eq!(root.left_children.len(), 1);
        assert_eq!(root.right_children.len(), 1);
    }

    #[test]
    fn test_pruning_equivalence_all_2x2_boards() {
        // Pruned and exhaustive classification must agree on every one of
        // the 4^4 possible 2x2 boards.
        let states = [Cell::Empty, Cell::LeftOwned, Cell::RightOwned, Cell::Shared];
        for a in states {
            for b in states {
                for c in states {
                    for d in states {
                        let board = Board::new(2, 2, vec![a, b, c, d]);
                        let exhaustive = classify_exhaustive(&board);
                        let pruned = Position::new(board.clone()).analyze();
                        assert_eq!(
                            pruned, exhaustive,
                            "Pruning changed the outcome of {:?}",
                            board
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_pruning_equivalence_random_boards() {
        for seed in 0..20 {
            let board = Board::random_with_seed(3, 2, seed);
            let exhaustive = classify_exhaustive(&board);
            let pruned = Position::new(board.clone()).analyze();
            assert_eq!(
                pruned, exhaustive,
                "Pruning changed the outcome of seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_winning_move_actually_wins() {
        // From any fuzzy or one-sided-win 2x2 board, the reported winning
        // move must land in a position the exhaustive classifier scores as
        // a win for the mover.
        let states = [Cell::Empty, Cell::LeftOwned, Cell::RightOwned, Cell::Shared];
        for a in states {
            for b in states {
                for c in states {
                    for d in states {
                        let board = Board::new(2, 2, vec![a, b, c, d]);
                        let mut root = Position::new(board);
                        let outcome = root.analyze();
                        if matches!(outcome, OutcomeClass::Left | OutcomeClass::Fuzzy) {
                            let reply = root.find_winning_move(true).unwrap();
                            assert!(classify_exhaustive(reply).wins_for_left());
                        }
                        if matches!(outcome, OutcomeClass::Right | OutcomeClass::Fuzzy) {
                            let reply = root.find_winning_move(false).unwrap();
                            assert!(classify_exhaustive(reply).wins_for_right());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_larger_shared_board_analyzes() {
        // A full 3x3 shared board is symmetric between the players, so the
        // outcome must be N or P, never one-sided.
        let outcome = analyze_lines(&["GGG", "GGG", "GGG"]);
        assert!(
            matches!(outcome, OutcomeClass::Fuzzy | OutcomeClass::Zero),
            "Symmetric board classified one-sided: {:?}",
            outcome
        );
    }
}
