//! This module provides functions for analyzing puzzle documents before
//! playback. The static checks catch structural problems (pegs out of range,
//! moves over zero disks); the dry-run check lets callers confirm that a
//! sequence actually solves its puzzle without driving a simulator.

use crate::pegs::PegState;
use crate::types::{HanoiError, Puzzle, TARGET_PEG};

/// Represents the errors that can be found during the analysis of a puzzle.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// A move references a peg outside `1..=3` (1-based move index, peg).
    InvalidPeg(usize, u8),
    /// A move names the same peg as source and target (1-based move index, peg).
    SamePeg(usize, u8),
    /// Structural problems with the document (moves over zero disks, etc.).
    StructuralError(String),
}

impl From<AnalysisError> for HanoiError {
    /// Converts an `AnalysisError` into a `HanoiError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidPeg(index, peg) => HanoiError::ValidationError(format!(
                "Move {} references invalid peg {}",
                index, peg
            )),
            AnalysisError::SamePeg(index, peg) => HanoiError::ValidationError(format!(
                "Move {} has identical source and target peg {}",
                index, peg
            )),
            AnalysisError::StructuralError(msg) => HanoiError::ValidationError(msg),
        }
    }
}

/// Analyzes a puzzle document for structural errors.
///
/// Runs every static check and reports the first failure. Deliberately does
/// NOT require the sequence to be minimal or even to solve the puzzle: the
/// simulator's runtime validation handles hand-edited move lists leniently.
/// Use [`check_solution`] when strictness is wanted.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(HanoiError::ValidationError)` for the first violated check.
pub fn analyze(puzzle: &Puzzle) -> Result<(), HanoiError> {
    let errors = [check_structure, check_pegs]
        .iter()
        .filter_map(|f| f(puzzle).err())
        .collect::<Vec<_>>();

    if let Some(first_error) = errors.first() {
        return Err(first_error.clone().into());
    }

    Ok(())
}

/// Checks basic structural requirements of the document.
///
/// A move list over zero disks can never apply its first move; flag it at
/// load time rather than at playback.
fn check_structure(puzzle: &Puzzle) -> Result<(), AnalysisError> {
    if puzzle.disks == 0 && !puzzle.moves.is_empty() {
        return Err(AnalysisError::StructuralError(format!(
            "Puzzle has no disks but {} moves",
            puzzle.moves.len()
        )));
    }

    Ok(())
}

/// Checks that every move's pegs are statically valid: both in `1..=3` and
/// distinct from each other.
fn check_pegs(puzzle: &Puzzle) -> Result<(), AnalysisError> {
    for (i, mov) in puzzle.moves.iter().enumerate() {
        let index = i + 1;
        for peg in [mov.from, mov.to] {
            if !(1..=3).contains(&peg) {
                return Err(AnalysisError::InvalidPeg(index, peg));
            }
        }
        if mov.from == mov.to {
            return Err(AnalysisError::SamePeg(index, mov.from));
        }
    }

    Ok(())
}

/// Dry-runs the puzzle's sequence against a fresh peg state and confirms it
/// solves the puzzle: no rule violated at any step, and all disks on peg 3
/// (pegs 1 and 2 empty) at the end.
///
/// # Returns
///
/// * `Ok(())` if the sequence is a valid solution.
/// * `Err(HanoiError)` describing the first violated rule, or a
///   `ValidationError` if the sequence ends with disks off the target peg.
pub fn check_solution(puzzle: &Puzzle) -> Result<(), HanoiError> {
    let mut pegs = PegState::new(puzzle.disks);

    for mov in &puzzle.moves {
        for peg in [mov.from, mov.to] {
            if !(1..=3).contains(&peg) {
                return Err(HanoiError::InvalidPeg(peg));
            }
        }
        if mov.from == mov.to {
            return Err(HanoiError::SamePeg(mov.from));
        }

        let disk = pegs
            .top_of(mov.from_index())
            .ok_or(HanoiError::EmptySourcePeg(mov.from))?;
        if let Some(top) = pegs.top_of(mov.to_index()) {
            if disk > top {
                return Err(HanoiError::SizeOrderViolation {
                    disk,
                    top,
                    peg: mov.to,
                });
            }
        }

        let disk = pegs.pop(mov.from_index())?;
        pegs.push(mov.to_index(), disk);
    }

    let target = (TARGET_PEG - 1) as usize;
    if !pegs.all_on(target) {
        return Err(HanoiError::ValidationError(format!(
            "Sequence ends with {} of {} disks on peg {}",
            pegs.peg(target).len(),
            puzzle.disks,
            TARGET_PEG
        )));
    }

    Ok(())
}
