//! # Last Block Standing Solver Library
//!
//! This library provides the core game logic for Last Block Standing, a
//! two-player combinatorial game, and a game-tree engine that classifies
//! any position into one of the four combinatorial-game-theory outcome
//! classes (L, R, N, P).
//!
//! It is used by two binaries:
//! - `play`: Interactive gameplay via the command line, against the
//!   computer or against another human at the same terminal.
//! - `analyze`: Takes a board file (or a seeded random board), builds the
//!   full game tree and reports the position's outcome class and the
//!   elapsed analysis time.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Board`), cell ownership
//!   states (`Cell`), the gravity-clearing rule and all move mechanics.
//! - `tree`: Provides `Position` (a game-tree node) with tree construction,
//!   outcome classification and winning/legal move selection.
//! - `utils`: Provides utility functions, such as parsing board
//!   configurations from text.

pub mod engine;
pub mod tree;
pub mod utils;
