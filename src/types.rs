//! This module defines the core data structures and types used throughout the Tower of Hanoi
//! simulator, including the puzzle representation, moves, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The number of pegs in the classic puzzle.
pub const PEG_COUNT: usize = 3;
/// The peg all disks start on (1-based, user-facing numbering).
pub const SOURCE_PEG: u8 = 1;
/// The peg all disks must end on (1-based, user-facing numbering).
pub const TARGET_PEG: u8 = 3;
/// Above this disk count a run becomes impractical to animate (2^10 - 1 = 1023 moves).
/// The boundary layer warns and asks for confirmation; the core imposes no limit.
pub const PRACTICAL_DISK_LIMIT: u32 = 10;
/// The default pause between applied moves, in milliseconds.
pub const DEFAULT_MOVE_DELAY_MS: u64 = 600;

/// The size of a disk. Sizes run from 1 (smallest) to N (largest);
/// exactly one disk of each size exists per run.
pub type Disk = u32;

/// A single disk transfer between two pegs.
///
/// Pegs are 1-based (`1..=3`) on every user-facing surface, matching the
/// numbering used in puzzle files and printed output. Moves are immutable
/// once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The peg the disk is lifted from.
    pub from: u8,
    /// The peg the disk is placed on.
    pub to: u8,
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    /// 0-based index of the source peg. Only meaningful after the peg
    /// numbers have been validated to lie in `1..=3`.
    pub fn from_index(&self) -> usize {
        (self.from - 1) as usize
    }

    /// 0-based index of the target peg. Only meaningful after validation.
    pub fn to_index(&self) -> usize {
        (self.to - 1) as usize
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A Tower of Hanoi puzzle document: a disk count plus the full, precomputed
/// move sequence to play back.
///
/// A puzzle either carries the solver's minimal sequence or an externally
/// supplied move list loaded from a `.hanoi` file. The sequence is read-only
/// for the remainder of the run once the simulator owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Puzzle {
    /// The name of the puzzle.
    pub name: String,
    /// The number of disks, all stacked on peg 1 initially.
    pub disks: u32,
    /// The ordered move sequence to apply.
    pub moves: Vec<Move>,
}

impl Puzzle {
    /// Creates a puzzle whose move list is the solver's minimal sequence.
    pub fn solved(name: impl Into<String>, disks: u32) -> Self {
        Self {
            name: name.into(),
            disks,
            moves: crate::solver::generate(disks),
        }
    }

    /// The number of moves in the sequence.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Whether the sequence has the minimal length `2^n - 1`.
    pub fn is_minimal(&self) -> bool {
        self.moves.len() as u64 == crate::solver::minimum_moves(self.disks)
    }
}

/// The phase of a simulation run.
///
/// A run moves through `AwaitingStart -> Running` and ends in exactly one of
/// the two terminal phases. No peg mutation happens outside `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pegs are seeded; the run blocks for an external start signal.
    AwaitingStart,
    /// Moves are being validated and applied in order.
    Running,
    /// Every move applied without error; all disks on the target peg.
    Finished,
    /// A move failed validation; the run stopped before mutating anything.
    HaltedOnError,
}

/// The outcome of a single simulator step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The start signal has not been given yet; nothing happened.
    Pending,
    /// One move was validated and applied.
    Applied(MoveApplied),
    /// The run is over (and stays over on subsequent steps).
    Halt(Halt),
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// The whole sequence was applied without error.
    Finished,
    /// A move failed validation.
    Err(Fault),
}

/// The event emitted for every applied move, for a renderer to animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveApplied {
    /// 1-based position of this move in the sequence.
    pub index: usize,
    /// Total number of moves in the sequence.
    pub total: usize,
    /// The peg the disk left (1-based).
    pub from: u8,
    /// The peg the disk landed on (1-based).
    pub to: u8,
    /// The size of the disk that moved.
    pub disk: Disk,
}

/// Details of a halted run: the violating move, its 1-based position in the
/// sequence, and the rule it broke.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub index: usize,
    pub mov: Move,
    pub error: HanoiError,
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "move {} ({}): {}", self.index, self.mov, self.error)
    }
}

/// Represents various errors that can occur during puzzle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HanoiError {
    /// The disk count supplied at the boundary was negative or not a whole number.
    #[error("Invalid disk count: {0}")]
    InvalidDiskCount(String),
    /// A move referenced a peg outside `1..=3`.
    #[error("Peg {0} is out of range (pegs are numbered 1 to 3)")]
    InvalidPeg(u8),
    /// A move named the same peg as both source and target.
    #[error("Source and target are both peg {0}")]
    SamePeg(u8),
    /// A move tried to lift a disk off a peg with no disks on it.
    #[error("Cannot move from empty peg {0}")]
    EmptySourcePeg(u8),
    /// A move tried to place a disk on top of a smaller one.
    #[error("Cannot place disk {disk} on smaller disk {top} (peg {peg})")]
    SizeOrderViolation { disk: Disk, top: Disk, peg: u8 },
    /// A programming-contract violation, such as popping an empty peg without
    /// validating first. Unreachable when the simulator drives the pegs.
    #[error("Illegal state: {0}")]
    IllegalState(String),
    /// Indicates an error during the parsing of a puzzle file.
    #[error("Puzzle parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error during the validation of a puzzle's structure.
    #[error("Puzzle validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_serialization() {
        let mov = Move::new(1, 3);

        let json = serde_json::to_string(&mov).unwrap();
        assert_eq!(json, r#"{"from":1,"to":3}"#);

        let deserialized: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mov, deserialized);
    }

    #[test]
    fn test_move_display_and_indices() {
        let mov = Move::new(2, 3);

        assert_eq!(mov.to_string(), "2 -> 3");
        assert_eq!(mov.from_index(), 1);
        assert_eq!(mov.to_index(), 2);
    }

    #[test]
    fn test_solved_puzzle_is_minimal() {
        let puzzle = Puzzle::solved("Three disks", 3);

        assert_eq!(puzzle.disks, 3);
        assert_eq!(puzzle.move_count(), 7);
        assert!(puzzle.is_minimal());
    }

    #[test]
    fn test_hand_written_puzzle_need_not_be_minimal() {
        let puzzle = Puzzle {
            name: "Detour".to_string(),
            disks: 1,
            moves: vec![Move::new(1, 2), Move::new(2, 3)],
        };

        assert!(!puzzle.is_minimal());
    }

    #[test]
    fn test_error_display() {
        let error = HanoiError::SizeOrderViolation {
            disk: 3,
            top: 1,
            peg: 2,
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("disk 3"));
        assert!(error_msg.contains("smaller disk 1"));
        assert!(error_msg.contains("peg 2"));
    }

    #[test]
    fn test_fault_display() {
        let fault = Fault {
            index: 4,
            mov: Move::new(1, 2),
            error: HanoiError::EmptySourcePeg(1),
        };

        let msg = fault.to_string();
        assert!(msg.contains("move 4"));
        assert!(msg.contains("1 -> 2"));
        assert!(msg.contains("empty peg 1"));
    }
}
