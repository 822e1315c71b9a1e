use rand::seq::SliceRandom;
use rand::thread_rng;

use super::board::Point;
use super::knowledge::KnowledgeBase;

/// A chosen move, tagged with whether it is proven safe or a blind guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Safe(Point),
    Guess(Point),
}

impl Move {
    pub fn point(&self) -> Point {
        match *self {
            Move::Safe(point) => point,
            Move::Guess(point) => point,
        }
    }
}

/// Safe-first policy: only fall back to guessing when nothing is proven.
/// None means the board is exhausted and the session should end.
pub fn generate_move(knowledge: &KnowledgeBase) -> Option<Move> {
    safe_move(knowledge)
        .map(Move::Safe)
        .or_else(|| random_move(knowledge).map(Move::Guess))
}

/// Some not-yet-probed cell proven safe, if any. Callers must not depend on
/// which one.
pub fn safe_move(knowledge: &KnowledgeBase) -> Option<Point> {
    let candidates: Vec<Point> = knowledge
        .safes()
        .difference(knowledge.moves_made())
        .cloned()
        .collect();
    candidates.choose(&mut thread_rng()).cloned()
}

/// A uniform choice among cells neither probed nor known to be mines.
pub fn random_move(knowledge: &KnowledgeBase) -> Option<Point> {
    let candidates: Vec<Point> = knowledge
        .size()
        .points()
        .into_iter()
        .filter(|point| !knowledge.moves_made().contains(point))
        .filter(|point| !knowledge.mines().contains(point))
        .collect();
    candidates.choose(&mut thread_rng()).cloned()
}
