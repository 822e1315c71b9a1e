use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Content {
    Mine,
    Empty,
}

#[derive(Debug)]
pub struct Cell {
    pub content: Content,
    pub mined_neighbor_count: usize,
    pub revealed: bool,
}

impl Cell {
    fn create_empty() -> Cell {
        Cell {
            content: Content::Empty,
            mined_neighbor_count: 0,
            revealed: false,
        }
    }

    fn to_str(&self) -> String {
        if !self.revealed {
            return String::from("□");
        }
        match self.content {
            Content::Mine => String::from("X"),
            Content::Empty => {
                if self.mined_neighbor_count == 0 {
                    String::from("_")
                } else {
                    self.mined_neighbor_count.to_string()
                }
            }
        }
    }
}

#[derive(Debug, Eq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn distance(&self, other: &Point) -> usize {
        //l-inf norm seems most appropriate for minesweeper
        (self.0 as i64 - other.0 as i64)
            .abs()
            .max((self.1 as i64 - other.1 as i64).abs()) as usize
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoardSize {
    width: usize,
    height: usize,
}

impl BoardSize {
    pub fn new(width: usize, height: usize) -> BoardSize {
        BoardSize { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.height && point.1 < self.width
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area())
            .filter_map(|x| self.point_from_integer(x))
            .collect()
    }

    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None;
        }
        Some(Point(x / self.width, x % self.width))
    }

    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        let mut neighbors = Vec::with_capacity(8);
        for i in -1..2i64 {
            for j in -1..2i64 {
                if i == 0 && j == 0 {
                    continue;
                }
                let row = point.0 as i64 + i;
                let col = point.1 as i64 + j;
                if row >= 0 && row < self.height as i64 && col >= 0 && col < self.width as i64 {
                    neighbors.push(Point(row as usize, col as usize));
                }
            }
        }
        neighbors
    }
}

fn sample_points(
    size: &BoardSize,
    n: usize,
    disallowed: &Point,
    disallowed_radius: usize,
) -> Option<Vec<Point>> {
    let mut possible: Vec<usize> = (0..size.area()).collect();
    possible.shuffle(&mut thread_rng());
    let possible: Vec<Point> = possible
        .iter()
        .map(|&x| size.point_from_integer(x).expect("bad size!"))
        .filter(|x| disallowed.distance(x) > disallowed_radius)
        .take(n)
        .collect();
    match possible.len() == n {
        false => None,
        true => Some(possible),
    }
}

/// Holds the ground truth the agent is trying to deduce. The knowledge base
/// never touches this directly; it only sees the counts reported by `probe`.
pub struct Board {
    pub size: BoardSize,
    field: Vec<Vec<Cell>>,
    pub mine_count: usize,
    pub initialized: bool,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl Board {
    pub fn new_from_ints(width: usize, height: usize, mine_count: usize) -> Board {
        Board::new_from_size(BoardSize::new(width, height), mine_count)
    }

    pub fn new_from_size(size: BoardSize, mine_count: usize) -> Board {
        let initialized = false;
        let mut field = Vec::with_capacity(size.height);
        for _ in 0..size.height {
            let mut row_vec = Vec::with_capacity(size.width);
            for _ in 0..size.width {
                row_vec.push(Cell::create_empty());
            }
            field.push(row_vec);
        }

        Board {
            size,
            field,
            mine_count,
            initialized,
        }
    }

    pub fn retrieve_cell(&self, point: &Point) -> &Cell {
        &self.field[point.0][point.1]
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell {
        &mut self.field[point.0][point.1]
    }

    // mines are placed on the first probe, keeping a clear radius around it
    fn initialize(&mut self, point: &Point) {
        for point in
            sample_points(&self.size, self.mine_count, point, 1).expect("failed to construct board")
        {
            self.field[point.0][point.1].content = Content::Mine;
            for neighbor in self.size.neighbor_points(&point) {
                self.retrieve_cell_mutable(&neighbor).mined_neighbor_count += 1;
            }
        }
        self.initialized = true;
    }

    /// Uncovers a cell and reports the true count of mines among its
    /// neighbors, or None when the probe hit a mine.
    pub fn probe(&mut self, point: &Point) -> Option<usize> {
        if !self.initialized {
            self.initialize(point);
        }
        let cell = self.retrieve_cell_mutable(point);
        cell.revealed = true;
        match cell.content {
            Content::Mine => None,
            Content::Empty => Some(cell.mined_neighbor_count),
        }
    }

    pub fn unrevealed_count(&self) -> usize {
        self.field
            .iter()
            .flatten()
            .filter(|cell| !cell.revealed)
            .count()
    }

    pub fn is_won(&self) -> bool {
        // winning means revealing every safe cell
        self.field.iter().flatten().all(|cell| match cell.content {
            Content::Mine => true,
            Content::Empty => cell.revealed,
        })
    }

    fn to_string(&self) -> String {
        let mut result = "  ".to_owned();
        for i in 0..self.size.width {
            result += &i.to_string()[..];
        }
        result += "\n";
        for (i, row) in self.field.iter().enumerate() {
            result += &i.to_string()[..];
            result += " ";
            for cell in row {
                result += &cell.to_str()[..];
            }
            result += "\n";
        }
        result
    }
}

#[cfg(test)]
use proptest::prelude::*;
