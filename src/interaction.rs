use regex::Regex;
use std::io;

use super::board::Point;

pub fn get_move() -> Point {
    loop {
        println!("Please input your move: ROW COL");
        let mut input = String::new();
        io::stdin().read_line(&mut input).expect("Failed to read");
        match point_from_string(&input) {
            Some(point) => return point,
            None => println!("Must be of the form: ROW COL"),
        }
    }
}

fn point_from_string(input: &str) -> Option<Point> {
    let re = Regex::new(r"(\d+)[,\s]+(\d+)").unwrap();
    let cap = re.captures_iter(input).next()?;
    let row: usize = cap[1].parse().ok()?;
    let col: usize = cap[2].parse().ok()?;
    Some(Point(row, col))
}
