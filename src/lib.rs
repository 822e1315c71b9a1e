pub mod agent;
pub mod board;
pub mod constraint;
pub mod knowledge;
mod interaction;
use std::thread;
use std::time;

use agent::Move;
use board::Board;
use constraint::ContradictionError;
use knowledge::KnowledgeBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    OutOfMoves,
}

pub fn game_loop(board: &mut Board) {
    while !board.is_won() {
        println!("{}", board);
        let point = interaction::get_move();
        if !board.size.contains(&point) {
            println!("That cell is off the board");
            continue;
        }
        if board.probe(&point).is_none() {
            println!("{}", board);
            println!("you lose");
            return;
        }
    }
    println!("{}", board);
    println!("you win!");
}

/// Thin driver around the knowledge base: forwards each reveal via
/// add_knowledge and always plays a proven-safe cell before guessing.
pub fn ai_game_loop(board: &mut Board) -> Result<Outcome, ContradictionError> {
    let mut knowledge = KnowledgeBase::new(board.size);
    loop {
        println!("{}", board);
        thread::sleep(time::Duration::from_millis(200));

        let chosen = match agent::generate_move(&knowledge) {
            None => return Ok(Outcome::OutOfMoves),
            Some(chosen) => chosen,
        };
        let point = match chosen {
            Move::Safe(point) => point,
            Move::Guess(point) => {
                println!("no safe move known, guessing {:?}", point);
                point
            }
        };

        match board.probe(&point) {
            None => {
                println!("{}", board);
                println!("hit a mine at {:?}", point);
                return Ok(Outcome::Lost);
            }
            Some(count) => knowledge.add_knowledge(point, count)?,
        }

        if board.is_won() {
            println!("{}", board);
            return Ok(Outcome::Won);
        }
    }
}
