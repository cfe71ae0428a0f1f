//! This module defines `PegState`, the logical model of the three pegs and the
//! disks stacked on them. It is exclusively owned and mutated by the simulator;
//! validation happens before mutation, so `push` and `pop` are trusted primitives.

use crate::types::{Disk, HanoiError, PEG_COUNT};

/// The three ordered disk stacks, read bottom-to-top.
///
/// Invariants: sizes strictly decrease from bottom to top on every peg, and
/// the union of the pegs is exactly `{1, ..., N}` with each size appearing
/// exactly once. A fresh state has all disks on peg 0 (peg 1 in user-facing
/// numbering), largest at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PegState {
    pegs: [Vec<Disk>; PEG_COUNT],
    disks: u32,
}

impl PegState {
    /// Creates the canonical initial state for `disks` disks: all on peg 0,
    /// sizes `disks, disks-1, ..., 1` bottom-to-top.
    pub fn new(disks: u32) -> Self {
        let first: Vec<Disk> = (1..=disks).rev().collect();
        Self {
            pegs: [first, Vec::new(), Vec::new()],
            disks,
        }
    }

    /// Returns the disk on top of the peg, or `None` if the peg is empty.
    pub fn top_of(&self, peg: usize) -> Option<Disk> {
        self.pegs[peg].last().copied()
    }

    /// Whether the peg holds no disks.
    pub fn is_empty(&self, peg: usize) -> bool {
        self.pegs[peg].is_empty()
    }

    /// Removes and returns the top disk of the peg.
    ///
    /// Calling this on an empty peg is a contract violation; the simulator
    /// validates emptiness first, so the error is unreachable in a normal run.
    pub fn pop(&mut self, peg: usize) -> Result<Disk, HanoiError> {
        self.pegs[peg].pop().ok_or_else(|| {
            HanoiError::IllegalState(format!("pop from empty peg {}", peg + 1))
        })
    }

    /// Places a disk on top of the peg.
    ///
    /// Does not re-check the size ordering; that is the simulator's job,
    /// performed before the pop/push pair.
    pub fn push(&mut self, peg: usize, disk: Disk) {
        self.pegs[peg].push(disk);
    }

    /// The disk stack of one peg, bottom-to-top.
    pub fn peg(&self, peg: usize) -> &[Disk] {
        &self.pegs[peg]
    }

    /// All three pegs, bottom-to-top each.
    pub fn pegs(&self) -> &[Vec<Disk>; PEG_COUNT] {
        &self.pegs
    }

    /// The total number of disks in the run.
    pub fn disks(&self) -> u32 {
        self.disks
    }

    /// Whether every disk sits on the given peg (the win condition when the
    /// peg is the target).
    pub fn all_on(&self, peg: usize) -> bool {
        self.pegs[peg].len() as u32 == self.disks
    }
}
