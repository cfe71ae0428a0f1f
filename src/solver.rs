//! This module generates the minimal move sequence for the Tower of Hanoi
//! puzzle. Generation is a pure function of the disk count: the recursion
//! returns freshly built sequences instead of appending to shared state, so
//! two calls with the same count always yield identical move lists.

use crate::types::{HanoiError, Move, SOURCE_PEG, TARGET_PEG};

/// Generates the full, ordered, minimal move sequence transferring `disks`
/// disks from peg 1 to peg 3.
///
/// The returned sequence has exactly `2^n - 1` moves, and applying it in
/// order to the canonical initial state never places a disk on a smaller one.
/// `generate(0)` is the empty sequence.
pub fn generate(disks: u32) -> Vec<Move> {
    transfer(disks, SOURCE_PEG, TARGET_PEG)
}

/// Moves `count` disks from `from` to `to`, using the remaining peg as
/// temporary holding space: move `count - 1` out of the way, transfer the
/// largest, move `count - 1` back on top of it.
fn transfer(count: u32, from: u8, to: u8) -> Vec<Move> {
    if count == 0 {
        return Vec::new();
    }

    let aux = auxiliary_of(from, to);
    let mut moves = transfer(count - 1, from, aux);
    moves.push(Move::new(from, to));
    moves.extend(transfer(count - 1, aux, to));

    moves
}

/// The peg that is neither source nor target of a move.
///
/// With 1-based pegs the three indices sum to 6, so the auxiliary peg is the
/// complement of the other two. Specific to the three-peg puzzle.
pub fn auxiliary_of(from: u8, to: u8) -> u8 {
    6 - from - to
}

/// The minimal number of moves for `disks` disks: `2^n - 1`.
pub fn minimum_moves(disks: u32) -> u64 {
    1u64.checked_shl(disks)
        .map(|total| total - 1)
        .unwrap_or(u64::MAX)
}

/// Parses a disk count from boundary input.
///
/// Negative or malformed input fails with `InvalidDiskCount`; re-prompting is
/// the caller's job, the generator itself never retries. The `u32` result
/// makes negative counts unrepresentable past this point.
pub fn parse_disk_count(input: &str) -> Result<u32, HanoiError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(HanoiError::InvalidDiskCount(
            "no input provided".to_string(),
        ));
    }

    trimmed.parse::<u32>().map_err(|_| {
        if trimmed.starts_with('-') && trimmed[1..].chars().all(|c| c.is_ascii_digit()) {
            HanoiError::InvalidDiskCount(format!(
                "disk count must be non-negative, got {}",
                trimmed
            ))
        } else {
            HanoiError::InvalidDiskCount(format!("not a whole number: '{}'", trimmed))
        }
    })
}
