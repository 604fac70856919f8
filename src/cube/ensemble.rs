// A batch of independent cubes driven by the same moves.

use log::warn;

use super::moves::{orientations, Move};
use super::sticker::StickerCube;
use super::{notation, Cube, CubeError, Snapshot};

/// N cubes receiving every move together. By default there are 24 of them,
/// one held in each global orientation, so a learner sees every rotated view
/// of the same position.
pub struct Ensemble<C: Cube = StickerCube> {
    members: Vec<C>,
    oriented: bool,
}

impl<C: Cube + Default> Ensemble<C> {
    pub fn new() -> Ensemble<C> {
        let mut e = Ensemble { members: Vec::new(), oriented: true };
        e.reset();
        e
    }

    /// `n` solved members, all in the canonical orientation.
    pub fn with_size(n: usize) -> Ensemble<C> {
        Ensemble { members: (0..n).map(|_| C::default()).collect(), oriented: false }
    }

    /// Returns every member to the solved state, re-orienting the default
    /// ensemble.
    pub fn reset(&mut self) {
        if !self.oriented {
            self.members.iter_mut().for_each(C::reset);
            return;
        }

        self.members = orientations()
            .iter()
            .map(|moves| {
                let mut cube = C::default();
                for &m in moves {
                    cube.turn(m);
                }
                cube
            })
            .collect();
    }
}

impl<C: Cube + Default> Default for Ensemble<C> {
    fn default() -> Ensemble<C> {
        Ensemble::new()
    }
}

impl<C: Cube> Ensemble<C> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[C] {
        &self.members
    }

    pub fn turn(&mut self, m: Move) {
        for cube in self.members.iter_mut() {
            cube.turn(m);
        }
    }

    /// Parses `moves` once and applies the result to every member.
    pub fn apply(&mut self, moves: &str) -> Result<(), CubeError> {
        let tokens = notation::parse(moves)?;
        self.apply_tokens(&tokens)
    }

    pub fn apply_tokens(&mut self, tokens: &[String]) -> Result<(), CubeError> {
        // Validate before touching any member.
        notation::expand_all(tokens)?;
        for cube in self.members.iter_mut() {
            cube.apply_tokens(tokens)?;
        }
        Ok(())
    }

    /// Solvedness of the first member. Members only differ by a global
    /// rotation, so they should all agree.
    pub fn is_solved(&self) -> bool {
        let solved = self.members.first().map_or(true, Cube::is_solved);
        if !self.members_agree() {
            warn!("ensemble members disagree on solvedness");
        }
        solved
    }

    pub fn members_agree(&self) -> bool {
        let mut verdicts = self.members.iter().map(Cube::is_solved);
        match verdicts.next() {
            Some(first) => verdicts.all(|v| v == first),
            None => true,
        }
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.members.iter().map(Cube::snapshot).collect()
    }

    /// History shared by all members.
    pub fn history(&self) -> &[String] {
        match self.members.first() {
            Some(cube) => cube.history(),
            None => &[],
        }
    }
}
