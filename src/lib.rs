//! This crate provides the core logic for a Tower of Hanoi simulator.
//! It includes modules for generating minimal move sequences, simulating and
//! validating their playback, parsing puzzle files, and managing a collection
//! of preset puzzles.

pub mod analyzer;
pub mod loader;
pub mod parser;
pub mod pegs;
pub mod puzzles;
pub mod simulator;
pub mod solver;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` and `check_solution` functions and `AnalysisError` enum.
pub use analyzer::{analyze, check_solution, AnalysisError};
/// Re-exports the `PuzzleLoader` struct from the loader module.
pub use loader::PuzzleLoader;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `PegState` struct from the pegs module.
pub use pegs::PegState;
/// Re-exports `PuzzleInfo`, `PuzzleManager`, and `PUZZLES` from the puzzles module.
pub use puzzles::{PuzzleInfo, PuzzleManager, PUZZLES};
/// Re-exports the `Simulator` struct from the simulator module.
pub use simulator::Simulator;
/// Re-exports the move-generation functions from the solver module.
pub use solver::{auxiliary_of, generate, minimum_moves, parse_disk_count};
/// Re-exports various types related to puzzle definition and execution.
pub use types::{
    Disk, Fault, Halt, HanoiError, Move, MoveApplied, Phase, Puzzle, Step,
    DEFAULT_MOVE_DELAY_MS, PRACTICAL_DISK_LIMIT,
};
