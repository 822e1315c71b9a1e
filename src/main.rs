use minesweeper_agent::board::Board;
use minesweeper_agent::{ai_game_loop, game_loop, Outcome};
use std::env;

fn main() {
    let mut board = Board::new_from_ints(9, 9, 10);
    if env::args().any(|arg| arg == "--human") {
        game_loop(&mut board);
        return;
    }
    match ai_game_loop(&mut board) {
        Ok(Outcome::Won) => println!("you win!"),
        Ok(Outcome::Lost) => println!("you lose"),
        Ok(Outcome::OutOfMoves) => println!("no moves left to make"),
        Err(contradiction) => eprintln!("inference failed: {}", contradiction),
    }
}
