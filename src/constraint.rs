use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::board::Point;

/// Raised when reduction drives a constraint's count outside [0, |cells|],
/// or when a cell gets derived as both a mine and safe. Either means the
/// reported counts were inconsistent, so inference halts rather than
/// producing unsound conclusions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContradictionError {
    #[error("mine count fell below zero")]
    CountBelowZero,
    #[error("mine count {count} exceeds the {cells} remaining cells")]
    CountExceedsCells { count: usize, cells: usize },
    #[error("cell {0:?} derived as both mine and safe")]
    ConflictingFact(Point),
}

/// A single logical sentence: exactly `count` of `cells` are mines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    cells: HashSet<Point>,
    count: usize,
}

impl Constraint {
    pub fn new(cells: HashSet<Point>, count: usize) -> Result<Constraint, ContradictionError> {
        if count > cells.len() {
            return Err(ContradictionError::CountExceedsCells {
                count,
                cells: cells.len(),
            });
        }
        Ok(Constraint { cells, count })
    }

    pub fn cells(&self) -> &HashSet<Point> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell is a mine exactly when the count covers the whole set.
    pub fn known_mines(&self) -> Option<&HashSet<Point>> {
        if self.count > 0 && self.count == self.cells.len() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Every cell is safe exactly when no mines remain in the set.
    pub fn known_safes(&self) -> Option<&HashSet<Point>> {
        if self.count == 0 && !self.cells.is_empty() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// A confirmed mine leaves the set and takes one count with it.
    pub fn mark_mine(&mut self, cell: &Point) -> Result<(), ContradictionError> {
        if self.cells.remove(cell) {
            self.count = self
                .count
                .checked_sub(1)
                .ok_or(ContradictionError::CountBelowZero)?;
        }
        Ok(())
    }

    /// A confirmed safe leaves the set; the count stays, no mine was removed.
    pub fn mark_safe(&mut self, cell: &Point) -> Result<(), ContradictionError> {
        if self.cells.remove(cell) && self.count > self.cells.len() {
            return Err(ContradictionError::CountExceedsCells {
                count: self.count,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Subset elimination: if our cells all sit inside `other`, the cells
    /// unique to `other` must hold the difference of the two counts.
    /// Returns None when we aren't a subset or the remainder says nothing.
    pub fn eliminate_from(
        &self,
        other: &Constraint,
    ) -> Result<Option<Constraint>, ContradictionError> {
        if !self.cells.is_subset(&other.cells) {
            return Ok(None);
        }
        let count = other
            .count
            .checked_sub(self.count)
            .ok_or(ContradictionError::CountBelowZero)?;
        let cells: HashSet<Point> = other.cells.difference(&self.cells).cloned().collect();
        if cells.is_empty() {
            if count > 0 {
                return Err(ContradictionError::CountExceedsCells { count, cells: 0 });
            }
            return Ok(None);
        }
        Constraint::new(cells, count).map(Some)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} = {}", self.cells, self.count)
    }
}

#[cfg(test)]
mod constraint_tests {
    use super::*;

    fn constraint(points: &[(usize, usize)], count: usize) -> Constraint {
        let cells = points.iter().map(|&(r, c)| Point(r, c)).collect();
        Constraint::new(cells, count).expect("inconsistent test constraint")
    }

    #[test]
    fn new_rejects_oversized_count() {
        let cells: HashSet<Point> = [Point(0, 0)].iter().cloned().collect();
        assert_eq!(
            Constraint::new(cells, 2),
            Err(ContradictionError::CountExceedsCells { count: 2, cells: 1 })
        );
    }

    #[test]
    fn full_count_means_all_mines() {
        let full = constraint(&[(0, 0), (0, 1)], 2);
        assert_eq!(full.known_mines().map(|cells| cells.len()), Some(2));
        assert_eq!(full.known_safes(), None);
    }

    #[test]
    fn zero_count_means_all_safe() {
        let empty_count = constraint(&[(0, 0), (0, 1)], 0);
        assert_eq!(empty_count.known_safes().map(|cells| cells.len()), Some(2));
        assert_eq!(empty_count.known_mines(), None);
    }

    #[test]
    fn partial_count_means_nothing_yet() {
        let partial = constraint(&[(0, 0), (0, 1)], 1);
        assert_eq!(partial.known_mines(), None);
        assert_eq!(partial.known_safes(), None);
    }

    #[test]
    fn mark_mine_removes_and_decrements() {
        let mut c = constraint(&[(0, 0), (0, 1)], 1);
        c.mark_mine(&Point(0, 0)).unwrap();
        assert_eq!(c, constraint(&[(0, 1)], 0));
        // absent cell is a no-op
        c.mark_mine(&Point(5, 5)).unwrap();
        assert_eq!(c, constraint(&[(0, 1)], 0));
    }

    #[test]
    fn mark_mine_underflow_is_a_contradiction() {
        let mut c = constraint(&[(0, 0), (0, 1)], 0);
        assert_eq!(
            c.mark_mine(&Point(0, 0)),
            Err(ContradictionError::CountBelowZero)
        );
    }

    #[test]
    fn mark_safe_removes_and_keeps_count() {
        let mut c = constraint(&[(0, 0), (0, 1), (0, 2)], 1);
        c.mark_safe(&Point(0, 1)).unwrap();
        assert_eq!(c, constraint(&[(0, 0), (0, 2)], 1));
        c.mark_safe(&Point(5, 5)).unwrap();
        assert_eq!(c, constraint(&[(0, 0), (0, 2)], 1));
    }

    #[test]
    fn mark_safe_stranding_the_count_is_a_contradiction() {
        let mut c = constraint(&[(0, 0), (0, 1)], 2);
        assert!(c.mark_safe(&Point(0, 0)).is_err());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let left = constraint(&[(0, 0), (1, 1), (2, 2)], 1);
        let right = constraint(&[(2, 2), (0, 0), (1, 1)], 1);
        assert_eq!(left, right);
        assert!(left != constraint(&[(0, 0), (1, 1), (2, 2)], 2));
    }

    #[test]
    fn eliminate_from_derives_the_remainder() {
        let small = constraint(&[(0, 0), (0, 1)], 1);
        let large = constraint(&[(0, 0), (0, 1), (0, 2)], 1);
        let derived = small.eliminate_from(&large).unwrap();
        assert_eq!(derived, Some(constraint(&[(0, 2)], 0)));
        // the other direction is not a subset
        assert_eq!(large.eliminate_from(&small).unwrap(), None);
    }

    #[test]
    fn eliminate_from_equal_sets_says_nothing() {
        let a = constraint(&[(0, 0), (0, 1)], 1);
        assert_eq!(a.eliminate_from(&a.clone()).unwrap(), None);
    }

    #[test]
    fn eliminate_from_detects_inconsistent_counts() {
        let small = constraint(&[(0, 0), (0, 1)], 2);
        let large = constraint(&[(0, 0), (0, 1), (0, 2)], 1);
        assert_eq!(
            small.eliminate_from(&large),
            Err(ContradictionError::CountBelowZero)
        );
    }
}
