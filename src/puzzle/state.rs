/// Number of pegs on the board.
pub const PEG_COUNT: usize = 3;

/// Disk positions on three pegs, each holding `layers` fixed slots.
///
/// Slot `0` is the top of a peg and slot `layers - 1` its base. A slot is `0` when empty or holds
/// the radius of a disk (odd, `1..=2L-1`, unique per disk). Occupied slots of a peg always form
/// one contiguous run ending at the base slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    layers: usize,
    pegs: [Vec<u32>; PEG_COUNT],
}

impl PuzzleState {
    /// All `layers` disks stacked on peg 0, largest at the base.
    pub fn new(layers: usize) -> Self {
        let full = (0..layers).map(disk_radius).collect();
        Self {
            layers,
            pegs: [full, vec![0; layers], vec![0; layers]],
        }
    }

    /// Disk count.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Slot contents of `peg`, top slot first.
    pub fn slots(&self, peg: usize) -> &[u32] {
        &self.pegs[peg]
    }

    /// Radius of the topmost disk on `peg`, if any.
    pub fn top_disk(&self, peg: usize) -> Option<u32> {
        self.pegs[peg].iter().copied().find(|&r| r != 0)
    }

    /// Number of disks currently on `peg`.
    pub fn height(&self, peg: usize) -> usize {
        self.pegs[peg].iter().filter(|&&r| r != 0).count()
    }

    /// Put `radius` into the lowest empty slot of `peg`, directly above its current stack.
    pub fn place_on_top(&mut self, peg: usize, radius: u32) {
        let slots = &mut self.pegs[peg];
        let Some(mut idx) = slots.len().checked_sub(1) else {
            return;
        };
        while slots[idx] != 0 && idx > 0 {
            idx -= 1;
        }
        slots[idx] = radius;
    }

    /// Move the top disk of `origin` onto `destination`. Returns the moved radius, or `None`
    /// (leaving the state untouched) when `origin` is empty.
    ///
    /// Hanoi legality is not checked.
    pub fn apply(&mut self, origin: usize, destination: usize) -> Option<u32> {
        let from = self.pegs[origin].iter().position(|&r| r != 0)?;
        let radius = self.pegs[origin][from];
        self.pegs[origin][from] = 0;
        self.place_on_top(destination, radius);
        Some(radius)
    }

    /// Whether every disk sits on peg 2 in solved order.
    pub fn is_solved(&self) -> bool {
        self.pegs[2]
            .iter()
            .enumerate()
            .all(|(slot, &r)| r == disk_radius(slot))
    }
}

/// Radius of the disk that rests in `slot` of a full peg.
pub fn disk_radius(slot: usize) -> u32 {
    (2 * slot + 1) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/puzzle/state.rs"]
mod tests;
