use itertools::Itertools;
use std::collections::HashSet;

use super::board::{BoardSize, Point};
use super::constraint::{Constraint, ContradictionError};

/// Everything the agent knows about one game: the cells it has probed, the
/// cells proven safe or mined, and the constraints still being reduced.
/// Facts only accumulate; nothing leaves `mines` or `safes` until the game
/// is torn down.
pub struct KnowledgeBase {
    size: BoardSize,
    moves_made: HashSet<Point>,
    mines: HashSet<Point>,
    safes: HashSet<Point>,
    constraints: Vec<Constraint>,
}

impl KnowledgeBase {
    pub fn new(size: BoardSize) -> KnowledgeBase {
        KnowledgeBase {
            size,
            moves_made: HashSet::new(),
            mines: HashSet::new(),
            safes: HashSet::new(),
            constraints: Vec::new(),
        }
    }

    pub fn size(&self) -> &BoardSize {
        &self.size
    }

    pub fn moves_made(&self) -> &HashSet<Point> {
        &self.moves_made
    }

    pub fn mines(&self) -> &HashSet<Point> {
        &self.mines
    }

    pub fn safes(&self) -> &HashSet<Point> {
        &self.safes
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Records that `cell` was safely uncovered with `count` mines among its
    /// neighbors, then runs inference to a fixed point. Probing the same cell
    /// twice is a no-op. A count that cannot be reconciled with what is
    /// already known surfaces as a ContradictionError.
    pub fn add_knowledge(&mut self, cell: Point, count: usize) -> Result<(), ContradictionError> {
        if !self.moves_made.insert(cell) {
            return Ok(());
        }
        self.mark_safe(cell)?;

        // the constraint covers only still-unknown neighbors; neighbors
        // already confirmed as mines still count toward the reported total
        let mut known_mine_neighbors = 0;
        let mut unknown = HashSet::new();
        for neighbor in self.size.neighbor_points(&cell) {
            if self.mines.contains(&neighbor) {
                known_mine_neighbors += 1;
            } else if !self.safes.contains(&neighbor) && !self.moves_made.contains(&neighbor) {
                unknown.insert(neighbor);
            }
        }
        let remaining = count
            .checked_sub(known_mine_neighbors)
            .ok_or(ContradictionError::CountBelowZero)?;

        if unknown.is_empty() {
            if remaining > 0 {
                return Err(ContradictionError::CountExceedsCells {
                    count: remaining,
                    cells: 0,
                });
            }
        } else {
            let constraint = Constraint::new(unknown, remaining)?;
            if !self.constraints.contains(&constraint) {
                self.constraints.push(constraint);
            }
        }

        self.infer()
    }

    fn mark_safe(&mut self, cell: Point) -> Result<(), ContradictionError> {
        if self.mines.contains(&cell) {
            return Err(ContradictionError::ConflictingFact(cell));
        }
        if self.safes.insert(cell) {
            for constraint in &mut self.constraints {
                constraint.mark_safe(&cell)?;
            }
        }
        Ok(())
    }

    fn mark_mine(&mut self, cell: Point) -> Result<(), ContradictionError> {
        if self.safes.contains(&cell) {
            return Err(ContradictionError::ConflictingFact(cell));
        }
        if self.mines.insert(cell) {
            for constraint in &mut self.constraints {
                constraint.mark_mine(&cell)?;
            }
        }
        Ok(())
    }

    /// Repeat-until-no-change loop over the two inference rules. Each pass
    /// either grows `mines`/`safes`, shrinks a constraint, adds a strictly
    /// new constraint, or drops an exhausted one, so the loop terminates on
    /// a finite board without an iteration cap.
    fn infer(&mut self) -> Result<(), ContradictionError> {
        loop {
            let mut progressed = false;

            // exhausted constraints carry no information
            let before = self.constraints.len();
            self.constraints.retain(|constraint| !constraint.is_empty());
            progressed |= self.constraints.len() != before;

            // direct inference: fully determined constraints name their cells
            let mut found_safe = Vec::new();
            let mut found_mine = Vec::new();
            for constraint in &self.constraints {
                if let Some(cells) = constraint.known_safes() {
                    found_safe.extend(cells.iter().cloned());
                }
                if let Some(cells) = constraint.known_mines() {
                    found_mine.extend(cells.iter().cloned());
                }
            }
            for cell in found_safe {
                if !self.safes.contains(&cell) {
                    self.mark_safe(cell)?;
                    progressed = true;
                }
            }
            for cell in found_mine {
                if !self.mines.contains(&cell) {
                    self.mark_mine(cell)?;
                    progressed = true;
                }
            }

            // subset elimination over every pair, both orientations
            let mut derived = Vec::new();
            for (i, j) in (0..self.constraints.len()).tuple_combinations() {
                let (a, b) = (&self.constraints[i], &self.constraints[j]);
                if let Some(constraint) = a.eliminate_from(b)? {
                    derived.push(constraint);
                }
                if let Some(constraint) = b.eliminate_from(a)? {
                    derived.push(constraint);
                }
            }
            for constraint in derived {
                if !self.constraints.contains(&constraint) {
                    self.constraints.push(constraint);
                    progressed = true;
                }
            }

            if !progressed {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
use proptest::prelude::*;


#[cfg(test)]
mod knowledge_property_tests {
    use super::*;
    use crate::board::Board;
    use proptest::collection::vec;

    proptest! {
        // play arbitrary probe sequences against a real board and check the
        // engine invariants after every reveal
        #[test]
        fn knowledge_stays_sound_and_monotone(
                width in 4..8usize, height in 4..8usize, mines in 1..5usize,
                probes in vec((0..8usize, 0..8usize), 1..25)) {
            let mut board = Board::new_from_ints(width, height, mines);
            let mut knowledge = KnowledgeBase::new(BoardSize::new(width, height));

            for (row, col) in probes {
                let point = Point(row % height, col % width);
                if knowledge.mines().contains(&point) {
                    continue;
                }
                let safes_before = knowledge.safes().clone();
                let mines_before = knowledge.mines().clone();
                match board.probe(&point) {
                    // the board never lies, so inference must never fail
                    None => break,
                    Some(count) => prop_assert!(knowledge.add_knowledge(point, count).is_ok()),
                }

                prop_assert!(safes_before.is_subset(knowledge.safes()));
                prop_assert!(mines_before.is_subset(knowledge.mines()));
                prop_assert!(knowledge.mines().is_disjoint(knowledge.safes()));
                for constraint in knowledge.constraints() {
                    prop_assert!(constraint.count() <= constraint.cells().len());
                    prop_assert!(!constraint.is_empty());
                }
                if let Some(choice) = crate::agent::random_move(&knowledge) {
                    prop_assert!(!knowledge.moves_made().contains(&choice));
                    prop_assert!(!knowledge.mines().contains(&choice));
                }
            }
        }
    }
}
