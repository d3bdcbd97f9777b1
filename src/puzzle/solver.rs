//! Lazy recursive Tower of Hanoi move sequence.

use crate::puzzle::state::PEG_COUNT;

/// One single-disk move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    /// Peg the disk leaves.
    pub origin: usize,
    /// Peg the disk lands on.
    pub destination: usize,
}

impl Move {
    /// Build a move between two distinct pegs.
    pub fn new(origin: usize, destination: usize) -> Self {
        debug_assert!(origin != destination && origin < PEG_COUNT && destination < PEG_COUNT);
        Self {
            origin,
            destination,
        }
    }
}

/// The peg that is neither `a` nor `b`.
pub fn spare_peg(a: usize, b: usize) -> usize {
    PEG_COUNT - a - b
}

#[derive(Clone, Copy, Debug)]
enum Task {
    Solve {
        count: u32,
        origin: usize,
        destination: usize,
    },
    Move(Move),
}

/// Iterator over the classic recursive solution, in execution order.
///
/// `solve(n, a, b)` expands to `solve(n-1, a, spare)`, `a -> b`, `solve(n-1, spare, b)`. The
/// recursion is kept on an explicit stack holding at most `2n` pending tasks, so the sequence is
/// produced lazily without materialising its `2^n - 1` moves.
#[derive(Clone, Debug)]
pub struct Moves {
    stack: Vec<Task>,
    remaining: u64,
}

impl Moves {
    /// Moves transferring `count` disks from `origin` to `destination`.
    pub fn new(count: u32, origin: usize, destination: usize) -> Self {
        let mut stack = Vec::with_capacity(2 * count as usize);
        if count > 0 {
            stack.push(Task::Solve {
                count,
                origin,
                destination,
            });
        }
        Self {
            stack,
            remaining: crate::config::options::total_moves(count),
        }
    }
}

impl Iterator for Moves {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            match self.stack.pop()? {
                Task::Move(mv) => {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(mv);
                }
                Task::Solve {
                    count: 1,
                    origin,
                    destination,
                } => {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(Move::new(origin, destination));
                }
                Task::Solve {
                    count,
                    origin,
                    destination,
                } => {
                    let temp = spare_peg(origin, destination);
                    self.stack.push(Task::Solve {
                        count: count - 1,
                        origin: temp,
                        destination,
                    });
                    self.stack.push(Task::Move(Move::new(origin, destination)));
                    self.stack.push(Task::Solve {
                        count: count - 1,
                        origin,
                        destination: temp,
                    });
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Full solution for `layers` disks: peg 0 to peg 2.
pub fn solve(layers: u32) -> Moves {
    Moves::new(layers, 0, 2)
}

#[cfg(test)]
#[path = "../../tests/unit/puzzle/solver.rs"]
mod tests;
