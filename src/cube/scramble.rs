// Seeded scrambles and one-move neighbourhoods.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use super::moves::{Move, N_MOVES};
use super::{new_rng, Cube};

/// Between 1 and `max_length` random primitive turns. The same seed always
/// gives the same sequence.
pub fn generate(seed: u64, max_length: usize) -> Vec<Move> {
    let mut rng = new_rng(seed);
    let length = rng.gen_range(1..=max_length.max(1));
    let random_move: Uniform<usize> = Uniform::from(0..N_MOVES);

    (0..length).map(|_| Move::from_index(random_move.sample(&mut rng))).collect()
}

/// Every cube one primitive turn away, paired with that turn. Solved cubes
/// have no successors.
pub fn successors<C: Cube + Clone>(cube: &C) -> Option<Vec<(Move, C)>> {
    if cube.is_solved() {
        return None;
    }

    Some(Move::all()
         .map(|m| {
             let mut next = cube.clone();
             next.apply_moves(&[m]);
             (m, next)
         })
         .collect())
}
