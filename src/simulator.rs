//! This module defines the `Simulator`, the state machine that plays a puzzle's
//! move sequence back against the logical peg model. Each move is validated
//! before any mutation; a violation halts the run with a report instead of
//! panicking, so externally supplied move lists degrade gracefully.

use std::time::Duration;

use crate::pegs::PegState;
use crate::types::{Fault, Halt, HanoiError, Move, MoveApplied, Phase, Puzzle, Step};

/// Plays a puzzle move-by-move, validating each move against the peg state,
/// applying it, and emitting one `Step` per advance.
///
/// The simulator exclusively owns its `PegState`; renderers observe it through
/// accessors and through the emitted steps, never mutate it. Pacing between
/// moves is the simulator's concern (`run_paced`), not a rendezvous with the
/// renderer: a renderer may lag visually, but logical state advances strictly
/// in move order.
pub struct Simulator {
    puzzle: Puzzle,
    pegs: PegState,
    applied: usize,
    phase: Phase,
    fault: Option<Fault>,
}

impl Simulator {
    /// Creates a simulator for the given puzzle: pegs seeded with all disks
    /// on peg 1, sequence ready, run blocked in `AwaitingStart`.
    pub fn new(puzzle: Puzzle) -> Self {
        let pegs = PegState::new(puzzle.disks);
        Self {
            pegs,
            applied: 0,
            phase: Phase::AwaitingStart,
            fault: None,
            puzzle,
        }
    }

    /// Creates a simulator over the solver's minimal sequence for `disks`.
    pub fn with_disks(disks: u32) -> Self {
        Self::new(Puzzle::solved(format!("{} disks", disks), disks))
    }

    /// Delivers the external start signal.
    ///
    /// An empty sequence passes straight through to `Finished`; otherwise the
    /// run enters `Running`. Signals outside `AwaitingStart` are ignored.
    pub fn start(&mut self) {
        if self.phase == Phase::AwaitingStart {
            self.phase = if self.puzzle.moves.is_empty() {
                Phase::Finished
            } else {
                Phase::Running
            };
        }
    }

    /// Executes one step of the run.
    ///
    /// Returns `Step::Pending` before the start signal, `Step::Applied` for
    /// each validated and applied move, and `Step::Halt` once the run is over.
    /// The terminal step is idempotent: stepping a finished or halted run
    /// keeps returning the same halt without touching the pegs.
    pub fn step(&mut self) -> Step {
        match self.phase {
            Phase::AwaitingStart => Step::Pending,
            Phase::Finished => Step::Halt(Halt::Finished),
            Phase::HaltedOnError => match &self.fault {
                Some(fault) => Step::Halt(Halt::Err(fault.clone())),
                None => Step::Halt(Halt::Finished),
            },
            Phase::Running => self.advance(),
        }
    }

    /// Validates and applies the next move of the sequence.
    fn advance(&mut self) -> Step {
        let mov = self.puzzle.moves[self.applied];
        let index = self.applied + 1;
        let total = self.puzzle.moves.len();

        if let Err(error) = self.validate(mov) {
            return self.halt_with(index, mov, error);
        }

        // Validated above, so the pop cannot fail; if it somehow does, halt
        // and report instead of crashing (lenient by design).
        let disk = match self.pegs.pop(mov.from_index()) {
            Ok(disk) => disk,
            Err(error) => return self.halt_with(index, mov, error),
        };
        self.pegs.push(mov.to_index(), disk);
        self.applied += 1;

        if self.applied == total {
            self.phase = Phase::Finished;
        }

        Step::Applied(MoveApplied {
            index,
            total,
            from: mov.from,
            to: mov.to,
            disk,
        })
    }

    /// Checks one move against the current peg state, in rule order: peg
    /// identifiers in range, distinct pegs, non-empty source, size ordering
    /// against the target's top disk.
    fn validate(&self, mov: Move) -> Result<(), HanoiError> {
        for peg in [mov.from, mov.to] {
            if !(1..=3).contains(&peg) {
                return Err(HanoiError::InvalidPeg(peg));
            }
        }
        if mov.from == mov.to {
            return Err(HanoiError::SamePeg(mov.from));
        }

        let disk = self
            .pegs
            .top_of(mov.from_index())
            .ok_or(HanoiError::EmptySourcePeg(mov.from))?;

        if let Some(top) = self.pegs.top_of(mov.to_index()) {
            if disk > top {
                return Err(HanoiError::SizeOrderViolation {
                    disk,
                    top,
                    peg: mov.to,
                });
            }
        }

        Ok(())
    }

    fn halt_with(&mut self, index: usize, mov: Move, error: HanoiError) -> Step {
        let fault = Fault { index, mov, error };
        self.fault = Some(fault.clone());
        self.phase = Phase::HaltedOnError;
        Step::Halt(Halt::Err(fault))
    }

    /// Drives the run to its halt, delivering every step to `sink`.
    ///
    /// Sends the start signal itself, so callers that want to block for an
    /// external trigger should do so before calling this.
    pub fn run<F: FnMut(&Step)>(&mut self, mut sink: F) -> Halt {
        self.start();

        loop {
            let step = self.step();
            sink(&step);
            match step {
                Step::Halt(halt) => return halt,
                Step::Applied(_) => continue,
                // Unreachable after start(), but a sink must never spin.
                Step::Pending => return Halt::Finished,
            }
        }
    }

    /// Like `run`, but sleeps `delay` after each applied move so a renderer
    /// has time to animate before logical state advances further.
    pub fn run_paced<F: FnMut(&Step)>(&mut self, delay: Duration, mut sink: F) -> Halt {
        self.start();

        loop {
            let step = self.step();
            sink(&step);
            match step {
                Step::Halt(halt) => return halt,
                Step::Applied(_) => std::thread::sleep(delay),
                Step::Pending => return Halt::Finished,
            }
        }
    }

    /// Resets the run to its initial configuration: pegs reseeded, no moves
    /// applied, blocked in `AwaitingStart` again.
    pub fn reset(&mut self) {
        self.pegs = PegState::new(self.puzzle.disks);
        self.applied = 0;
        self.phase = Phase::AwaitingStart;
        self.fault = None;
    }

    /// The current phase of the run.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The logical peg state, for renderers to draw.
    pub fn pegs(&self) -> &PegState {
        &self.pegs
    }

    /// The puzzle being played.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// How many moves have been applied so far.
    pub fn moves_applied(&self) -> usize {
        self.applied
    }

    /// The total number of moves in the sequence.
    pub fn total_moves(&self) -> usize {
        self.puzzle.moves.len()
    }

    /// The fault that halted the run, if any.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Whether the run is in a terminal phase.
    pub fn is_halted(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::HaltedOnError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TARGET_PEG;

    fn puzzle_with_moves(disks: u32, moves: Vec<(u8, u8)>) -> Puzzle {
        Puzzle {
            name: "Test Puzzle".to_string(),
            disks,
            moves: moves.into_iter().map(|(f, t)| Move::new(f, t)).collect(),
        }
    }

    #[test]
    fn test_pending_before_start() {
        let mut sim = Simulator::with_disks(2);

        assert_eq!(sim.phase(), Phase::AwaitingStart);
        assert_eq!(sim.step(), Step::Pending);
        // No mutation while awaiting the start signal.
        assert_eq!(sim.pegs().peg(0), &[2, 1]);
        assert_eq!(sim.moves_applied(), 0);
    }

    #[test]
    fn test_zero_disks_finishes_straight_through() {
        let mut sim = Simulator::with_disks(0);

        sim.start();
        assert_eq!(sim.phase(), Phase::Finished);
        assert_eq!(sim.step(), Step::Halt(Halt::Finished));
    }

    #[test]
    fn test_single_move_run() {
        let mut sim = Simulator::with_disks(1);
        sim.start();

        let step = sim.step();
        assert_eq!(
            step,
            Step::Applied(MoveApplied {
                index: 1,
                total: 1,
                from: 1,
                to: 3,
                disk: 1,
            })
        );
        assert_eq!(sim.phase(), Phase::Finished);
        assert_eq!(sim.step(), Step::Halt(Halt::Finished));
    }

    #[test]
    fn test_full_run_lands_all_disks_on_target() {
        let mut sim = Simulator::with_disks(3);

        let mut applied = 0;
        let halt = sim.run(|step| {
            if matches!(step, Step::Applied(_)) {
                applied += 1;
            }
        });

        assert_eq!(halt, Halt::Finished);
        assert_eq!(applied, 7);
        let target = (TARGET_PEG - 1) as usize;
        assert_eq!(sim.pegs().peg(target), &[3, 2, 1]);
        assert!(sim.pegs().is_empty(0));
        assert!(sim.pegs().is_empty(1));
    }

    #[test]
    fn test_event_indices_count_up_from_one() {
        let mut sim = Simulator::with_disks(2);
        sim.start();

        for expected in 1..=3 {
            match sim.step() {
                Step::Applied(event) => {
                    assert_eq!(event.index, expected);
                    assert_eq!(event.total, 3);
                }
                step => panic!("expected an applied move, got {:?}", step),
            }
        }
    }

    #[test]
    fn test_empty_source_halts_and_leaves_pegs_unchanged() {
        // Peg 1 is empty when disks = 0, so the very first move must halt.
        let mut sim = Simulator::new(puzzle_with_moves(0, vec![(1, 2)]));
        sim.start();

        let step = sim.step();
        match step {
            Step::Halt(Halt::Err(fault)) => {
                assert_eq!(fault.index, 1);
                assert_eq!(fault.mov, Move::new(1, 2));
                assert_eq!(fault.error, HanoiError::EmptySourcePeg(1));
            }
            step => panic!("expected a halt, got {:?}", step),
        }

        assert_eq!(sim.phase(), Phase::HaltedOnError);
        assert!(sim.pegs().is_empty(0));
        assert!(sim.pegs().is_empty(1));
        assert!(sim.pegs().is_empty(2));
    }

    #[test]
    fn test_size_order_violation_halts() {
        // Legal opening (disk 1 to peg 2), then disk 2 onto the smaller disk 1.
        let mut sim = Simulator::new(puzzle_with_moves(2, vec![(1, 2), (1, 2)]));
        sim.start();

        assert!(matches!(sim.step(), Step::Applied(_)));

        match sim.step() {
            Step::Halt(Halt::Err(fault)) => {
                assert_eq!(fault.index, 2);
                assert_eq!(
                    fault.error,
                    HanoiError::SizeOrderViolation {
                        disk: 2,
                        top: 1,
                        peg: 2,
                    }
                );
            }
            step => panic!("expected a halt, got {:?}", step),
        }

        // State is exactly as after the last successful move.
        assert_eq!(sim.pegs().peg(0), &[2]);
        assert_eq!(sim.pegs().peg(1), &[1]);
        assert!(sim.pegs().is_empty(2));
        assert_eq!(sim.moves_applied(), 1);
    }

    #[test]
    fn test_invalid_peg_halts() {
        let mut sim = Simulator::new(puzzle_with_moves(1, vec![(1, 4)]));
        sim.start();

        match sim.step() {
            Step::Halt(Halt::Err(fault)) => {
                assert_eq!(fault.error, HanoiError::InvalidPeg(4));
            }
            step => panic!("expected a halt, got {:?}", step),
        }
    }

    #[test]
    fn test_same_peg_halts() {
        let mut sim = Simulator::new(puzzle_with_moves(1, vec![(2, 2)]));
        sim.start();

        match sim.step() {
            Step::Halt(Halt::Err(fault)) => {
                assert_eq!(fault.error, HanoiError::SamePeg(2));
            }
            step => panic!("expected a halt, got {:?}", step),
        }
    }

    #[test]
    fn test_halted_run_processes_no_further_moves() {
        // The bad move is followed by a legal one, which must never run.
        let mut sim = Simulator::new(puzzle_with_moves(1, vec![(2, 3), (1, 3)]));
        sim.start();

        assert!(matches!(sim.step(), Step::Halt(Halt::Err(_))));
        let before = sim.pegs().clone();

        // Stepping again re-reports the same fault without mutating.
        match sim.step() {
            Step::Halt(Halt::Err(fault)) => assert_eq!(fault.index, 1),
            step => panic!("expected a halt, got {:?}", step),
        }
        assert_eq!(sim.pegs(), &before);
        assert_eq!(sim.moves_applied(), 0);
    }

    #[test]
    fn test_non_minimal_external_sequence_plays_back() {
        // A valid but non-minimal route for two disks.
        let mut sim = Simulator::new(puzzle_with_moves(
            2,
            vec![(1, 3), (1, 2), (3, 1), (2, 3), (1, 3)],
        ));

        let halt = sim.run(|_| {});
        assert_eq!(halt, Halt::Finished);
        assert_eq!(sim.pegs().peg(2), &[2, 1]);
    }

    #[test]
    fn test_reset_returns_to_awaiting_start() {
        let mut sim = Simulator::with_disks(2);
        sim.run(|_| {});
        assert_eq!(sim.phase(), Phase::Finished);

        sim.reset();
        assert_eq!(sim.phase(), Phase::AwaitingStart);
        assert_eq!(sim.pegs().peg(0), &[2, 1]);
        assert_eq!(sim.moves_applied(), 0);
        assert!(sim.fault().is_none());
    }

    #[test]
    fn test_run_reports_terminal_halt_to_sink() {
        let mut sim = Simulator::with_disks(1);

        let mut saw_finish = false;
        sim.run(|step| {
            if matches!(step, Step::Halt(Halt::Finished)) {
                saw_finish = true;
            }
        });

        assert!(saw_finish);
    }
}
